//! Dashboard themes
//!
//! Themes only change how the report is painted. Both variants render the
//! same analysis.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// No colors
    #[default]
    Plain,
    /// Pink accents
    Pink,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Plain => "plain",
            Theme::Pink => "pink",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Plain => Palette {
                heading: "",
                accent: "",
                warning: "",
                success: "",
                reset: "",
                bar: '█',
            },
            Theme::Pink => Palette {
                heading: "\x1b[1;38;5;205m",
                accent: "\x1b[38;5;218m",
                warning: "\x1b[38;5;197m",
                success: "\x1b[38;5;211m",
                reset: "\x1b[0m",
                bar: '♥',
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Theme::Plain),
            "pink" => Ok(Theme::Pink),
            _ => Err(format!("Unknown theme: {}. Available: plain, pink", s)),
        }
    }
}

/// ANSI styling for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    heading: &'static str,
    accent: &'static str,
    warning: &'static str,
    success: &'static str,
    reset: &'static str,
    bar: char,
}

impl Palette {
    pub fn heading(&self, text: &str) -> String {
        self.paint(self.heading, text)
    }

    pub fn accent(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(self.warning, text)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(self.success, text)
    }

    /// Bar of `len` cells in the theme's bar glyph
    pub fn bar(&self, len: usize) -> String {
        self.accent(&self.bar.to_string().repeat(len))
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if code.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", code, text, self.reset)
        }
    }
}
