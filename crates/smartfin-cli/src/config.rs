//! Dashboard configuration
//!
//! Config is loaded with a three-layer resolution, falling through to the
//! next layer when a file is absent:
//! 1. `--config PATH` when given and present
//! 2. User override (~/.config/smartfin/dashboard.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Only presentation settings live here. Rule thresholds are fixed.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::theme::Theme;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/dashboard.toml");

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub theme: Theme,
    /// Width of the longest bar in text charts
    pub bar_width: usize,
    /// Currency label printed before amounts
    pub currency: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Plain,
            bar_width: 40,
            currency: "Rp".to_string(),
        }
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Embedded => write!(f, "(built-in defaults)"),
        }
    }
}

/// Default user override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("smartfin").join("dashboard.toml"))
}

/// Load configuration (explicit path, then user override, then default)
pub fn load_config(override_path: Option<&Path>) -> Result<(DashboardConfig, ConfigSource)> {
    resolve_config(override_path, default_config_path().as_deref())
}

fn resolve_config(
    override_path: Option<&Path>,
    user_path: Option<&Path>,
) -> Result<(DashboardConfig, ConfigSource)> {
    if let Some(path) = override_path {
        if path.exists() {
            return load_file(path);
        }
        warn!(path = %path.display(), "Config file not found, trying user override");
    }

    if let Some(path) = user_path {
        if path.exists() {
            return load_file(path);
        }
    }

    debug!("Using embedded dashboard config");
    Ok((parse_config(DEFAULT_CONFIG)?, ConfigSource::Embedded))
}

fn load_file(path: &Path) -> Result<(DashboardConfig, ConfigSource)> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    debug!(path = %path.display(), "Loaded dashboard config");
    Ok((config, ConfigSource::File(path.to_path_buf())))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    display: Option<RawDisplay>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    theme: Option<Theme>,
    bar_width: Option<usize>,
    currency: Option<String>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<DashboardConfig> {
    let raw: RawConfig = toml::from_str(content).context("Invalid config TOML")?;

    let mut config = DashboardConfig::default();

    if let Some(display) = raw.display {
        if let Some(theme) = display.theme {
            config.theme = theme;
        }
        if let Some(width) = display.bar_width {
            if width == 0 {
                bail!("display.bar_width must be at least 1");
            }
            config.bar_width = width;
        }
        if let Some(currency) = display.currency {
            config.currency = currency;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config("[display]\ntheme = \"pink\"\n").unwrap();
        assert_eq!(config.theme, Theme::Pink);
        assert_eq!(config.bar_width, 40);
        assert_eq!(config.currency, "Rp");
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(parse_config("").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_unknown_theme_rejected() {
        assert!(parse_config("[display]\ntheme = \"neon\"\n").is_err());
    }

    #[test]
    fn test_zero_bar_width_rejected() {
        assert!(parse_config("[display]\nbar_width = 0\n").is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nbar_width = 12\ncurrency = \"IDR\"").unwrap();

        let (config, source) = load_config(Some(file.path())).unwrap();
        assert_eq!(config.bar_width, 12);
        assert_eq!(config.currency, "IDR");
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_missing_paths_fall_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let missing_user = dir.path().join("user.toml");

        let (config, source) = resolve_config(Some(&missing), Some(&missing_user)).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(source, ConfigSource::Embedded);
    }

    #[test]
    fn test_missing_explicit_path_falls_through_to_user_override() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let user = dir.path().join("dashboard.toml");
        fs::write(&user, "[display]\ntheme = \"pink\"\n").unwrap();

        let (config, source) = resolve_config(Some(&missing), Some(&user)).unwrap();
        assert_eq!(config.theme, Theme::Pink);
        assert_eq!(source, ConfigSource::File(user));
    }

    #[test]
    fn test_explicit_path_wins_over_user_override() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.toml");
        let user = dir.path().join("dashboard.toml");
        fs::write(&explicit, "[display]\nbar_width = 10\n").unwrap();
        fs::write(&user, "[display]\nbar_width = 20\n").unwrap();

        let (config, source) = resolve_config(Some(&explicit), Some(&user)).unwrap();
        assert_eq!(config.bar_width, 10);
        assert_eq!(source, ConfigSource::File(explicit));
    }
}
