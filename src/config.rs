use serde::Deserialize;

use crate::estimate::Thresholds;

/// Smallest period the metrics backend aggregates at.
pub const MIN_PERIOD_SECS: u32 = 15;

/// Longest trailing window that may be queried (7 days).
pub const MAX_WINDOW_SECS: u64 = 7 * 24 * 3600;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub source: SourceConfig,
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// JSON export holding the three series.
    pub path: String,
    #[serde(default = "default_period_secs")]
    pub period_secs: u32,
    /// Trailing window to query, ending now.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl SourceConfig {
    /// The trailing window as a duration.
    pub fn window(&self) -> anyhow::Result<chrono::TimeDelta> {
        let secs = i64::try_from(self.window_secs)?;
        chrono::TimeDelta::try_seconds(secs)
            .ok_or_else(|| anyhow::anyhow!("source.window_secs out of range: {}", secs))
    }
}

fn default_period_secs() -> u32 {
    60
}

fn default_window_secs() -> u64 {
    3600
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_upper")]
    pub upper: f64,
    #[serde(default = "default_lower")]
    pub lower: f64,
}

fn default_upper() -> f64 {
    0.60
}

fn default_lower() -> f64 {
    0.40
}

impl ThresholdsConfig {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.upper, self.lower)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One log line per point plus a summary.
    #[default]
    Log,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.source.path.is_empty(), "source.path must be non-empty");
        anyhow::ensure!(
            self.source.period_secs >= MIN_PERIOD_SECS,
            "source.period_secs must be >= {}, got {}",
            MIN_PERIOD_SECS,
            self.source.period_secs
        );
        anyhow::ensure!(
            self.source.window_secs >= self.source.period_secs as u64,
            "source.window_secs must be >= source.period_secs, got {}",
            self.source.window_secs
        );
        anyhow::ensure!(
            self.source.window_secs <= MAX_WINDOW_SECS,
            "source.window_secs must be <= {}, got {}",
            MAX_WINDOW_SECS,
            self.source.window_secs
        );
        anyhow::ensure!(
            self.thresholds.lower > 0.0 && self.thresholds.lower <= 1.0,
            "thresholds.lower must be in (0, 1], got {}",
            self.thresholds.lower
        );
        anyhow::ensure!(
            self.thresholds.upper > 0.0 && self.thresholds.upper <= 1.0,
            "thresholds.upper must be in (0, 1], got {}",
            self.thresholds.upper
        );
        anyhow::ensure!(
            self.thresholds.lower <= self.thresholds.upper,
            "thresholds.lower ({}) must not exceed thresholds.upper ({})",
            self.thresholds.lower,
            self.thresholds.upper
        );
        Ok(())
    }
}
