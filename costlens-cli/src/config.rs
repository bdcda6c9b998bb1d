use anyhow::{Context, Result};
use costlens_core::time::is_valid_display_format;
use costlens_core::{DEFAULT_DISPLAY_FORMAT, DEFAULT_LABEL_MAX_CHARS};
use costlens_report::{AggregateOptions, DEFAULT_DAILY_WINDOW};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::home::{costlens_home, ensure_costlens_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub report: ReportSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    /// Categories shown in the overview and breakdown charts
    pub top_categories: usize,
    /// Days shown in the "recent daily summary" block
    pub recent_days: usize,
    pub label_max_chars: usize,
    /// Most recent distinct days kept in the timeline
    pub daily_window: usize,
    /// strftime pattern for day labels
    pub display_date_format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default filter when RUST_LOG is not set
    pub level: String,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            top_categories: 8,
            recent_days: 8,
            label_max_chars: DEFAULT_LABEL_MAX_CHARS,
            daily_window: DEFAULT_DAILY_WINDOW,
            display_date_format: DEFAULT_DISPLAY_FORMAT.to_string(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ReportSection {
    pub fn aggregate_options(&self) -> AggregateOptions {
        let display_date_format = if is_valid_display_format(&self.display_date_format) {
            self.display_date_format.clone()
        } else {
            warn!(
                format = %self.display_date_format,
                "invalid display_date_format, using {DEFAULT_DISPLAY_FORMAT}"
            );
            DEFAULT_DISPLAY_FORMAT.to_string()
        };
        AggregateOptions {
            label_max_chars: self.label_max_chars,
            daily_window: self.daily_window,
            display_date_format,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(costlens_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Missing file means defaults.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_costlens_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let p = config_path()?;
    let cfg = load_config_from(&p)?;
    let source = if p.exists() { "file" } else { "defaults" };
    println!("# {} ({source})", p.display());
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.report.top_categories, 8);
        assert_eq!(cfg.report.daily_window, 30);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[report]\ndaily_window = 7\n").unwrap();
        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.report.daily_window, 7);
        assert_eq!(cfg.report.label_max_chars, 25);
        assert_eq!(cfg.logging, LoggingSection::default());
    }

    #[test]
    fn test_round_trip_and_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.report.display_date_format = "%Y-%m-%d".to_string();
        save_config_to(&cfg, &p).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);

        fs::write(&p, "report = 3").unwrap();
        assert!(load_config_from(&p).is_err());
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let section = ReportSection {
            display_date_format: "%Q".to_string(),
            ..ReportSection::default()
        };
        let opts = section.aggregate_options();
        assert_eq!(opts.display_date_format, DEFAULT_DISPLAY_FORMAT);
        assert_eq!(opts.daily_window, 30);
    }
}
