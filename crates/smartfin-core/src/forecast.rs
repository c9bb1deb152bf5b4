//! Next-month spending forecast
//!
//! Fits an ordinary least squares line through the monthly totals, using the
//! number of months since the earliest month as the only explanatory
//! variable, and evaluates it one month past the latest month in the data.

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Forecast, MonthKey, MonthlyTotal};

/// Predict spending for the month after the latest monthly total
///
/// With a single month the fitted line is flat and the prediction equals
/// that month's total. Empty input is rejected with `Error::EmptyData`.
pub fn forecast_next_month(monthly: &[MonthlyTotal]) -> Result<Forecast> {
    let origin = monthly
        .iter()
        .map(|m| m.month)
        .min()
        .ok_or(Error::EmptyData)?;
    let latest = monthly
        .iter()
        .map(|m| m.month)
        .max()
        .ok_or(Error::EmptyData)?;

    let offset = |month: MonthKey| (month.ordinal() - origin.ordinal()) as f64;
    let points: Vec<(f64, f64)> = monthly.iter().map(|m| (offset(m.month), m.total)).collect();
    let (slope, intercept) = least_squares(&points);

    let target = latest.next();
    let amount = intercept + slope * offset(target);

    debug!(
        target = %target,
        amount,
        slope,
        months = points.len(),
        "Forecast computed"
    );

    Ok(Forecast {
        target,
        origin,
        amount,
        slope,
        intercept,
        months_used: points.len(),
    })
}

/// Closed-form OLS fit, returning (slope, intercept at x = 0)
///
/// A zero x-variance yields a flat line through the mean.
fn least_squares(points: &[(f64, f64)]) -> (f64, f64) {
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (x, y) in points {
        let dx = x - mean_x;
        sxy += dx * (y - mean_y);
        sxx += dx * dx;
    }

    let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
    (slope, mean_y - slope * mean_x)
}
