// Configuration loading and parsing (config/league.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueSection {
    pub name: String,
    pub num_teams: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSection {
    /// Fold the in-progress week into cross-team season metrics.
    #[serde(default)]
    pub include_current_week: bool,
    /// Trailing-week window behind hot/cold form and matchup previews.
    #[serde(default = "default_hot_cold_window")]
    pub hot_cold_window: usize,
    /// League-wide bottom share flagged as weak per category.
    #[serde(default = "default_weak_category_quantile")]
    pub weak_category_quantile: f64,
}

impl Default for AnalyticsSection {
    fn default() -> Self {
        AnalyticsSection {
            include_current_week: false,
            hot_cold_window: default_hot_cold_window(),
            weak_category_quantile: default_weak_category_quantile(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    /// Seconds a live snapshot stays fresh before the upstream is asked
    /// again.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
}

impl Default for CacheSection {
    fn default() -> Self {
        CacheSection {
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataSection {
    /// Snapshot data directory. When omitted, the platform data dir is
    /// used.
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_hot_cold_window() -> usize {
    4
}

fn default_weak_category_quantile() -> f64 {
    0.25
}

fn default_ttl_seconds() -> i64 {
    60
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Raw deserialization target for the whole league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    league: LeagueSection,
    #[serde(default)]
    analytics: AnalyticsSection,
    #[serde(default)]
    cache: CacheSection,
    #[serde(default)]
    data: DataSection,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueSection,
    pub analytics: AnalyticsSection,
    pub cache: CacheSection,
    pub data: DataSection,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            league: LeagueSection {
                name: "league".to_string(),
                num_teams: 10,
            },
            analytics: AnalyticsSection::default(),
            cache: CacheSection::default(),
            data: DataSection::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` relative to
/// the given base dir.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("league.toml");
    let text = read_file(&path)?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        league: file.league,
        analytics: file.analytics,
        cache: file.cache,
        data: file.data,
    };
    validate(&config)?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.num_teams < 2 {
        return Err(ConfigError::ValidationError {
            field: "league.num_teams".to_string(),
            message: "a league needs at least two teams".to_string(),
        });
    }
    let q = config.analytics.weak_category_quantile;
    if !(q > 0.0 && q < 1.0) {
        return Err(ConfigError::ValidationError {
            field: "analytics.weak_category_quantile".to_string(),
            message: format!("must be strictly between 0 and 1, got {q}"),
        });
    }
    if config.analytics.hot_cold_window == 0 {
        return Err(ConfigError::ValidationError {
            field: "analytics.hot_cold_window".to_string(),
            message: "window must be at least one week".to_string(),
        });
    }
    if config.cache.ttl_seconds < 0 {
        return Err(ConfigError::ValidationError {
            field: "cache.ttl_seconds".to_string(),
            message: "TTL cannot be negative".to_string(),
        });
    }
    Ok(())
}
