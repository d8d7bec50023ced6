//! Startup configuration.
//!
//! Three sources, all read once:
//! - a JSON file with the monitored pairs and RCI thresholds
//! - credentials for the push channel, from the process environment
//! - the execution-mode flag, from the process environment
//!
//! Everything here is fatal when missing: no scan runs on a partial config.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use market::signal::ThresholdSet;
use market::types::{Granularity, Instrument, Lookback};
use scheduler::types::{DEFAULT_POLL_INTERVAL, ScanConfig, ScheduleMode};

/// Env vars holding the channel access token, in lookup order.
pub const TOKEN_VARS: [&str; 2] = ["LINE_CHANNEL_ACCESS_TOKEN", "line_channel_access_token"];

/// Env vars holding the notification recipient, in lookup order.
pub const USER_VARS: [&str; 2] = ["LINE_USER_ID", "line_user_id"];

/// Set to `true` by CI runners; selects one-shot mode.
pub const ONE_SHOT_FLAG: &str = "GITHUB_ACTIONS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config lists no pairs")]
    NoPairs,

    #[error("poll interval must be at least one second")]
    InvalidPollInterval,

    #[error("missing credential: set {0}")]
    MissingCredential(&'static str),
}

/// Shape of the JSON config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Display name -> provider ticker, visited in file order.
    #[serde(deserialize_with = "ordered_pairs")]
    pub pairs: Vec<Instrument>,

    #[serde(alias = "thresholds")]
    pub mochipoyo: ThresholdSet,

    /// Bar size, e.g. "1m".
    #[serde(default)]
    pub interval: Granularity,

    /// History range, e.g. "1d".
    #[serde(default)]
    pub period: Lookback,

    #[serde(default = "default_poll_secs")]
    pub poll_interval_secs: u64,
}

fn default_poll_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

impl ConfigFile {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let file: Self = serde_json::from_str(raw)?;

        if file.pairs.is_empty() {
            return Err(ConfigError::NoPairs);
        }
        if file.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }

        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::Missing(path.to_path_buf()),
            _ => ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Self::from_json(&raw)
    }
}

/// A JSON object read as an ordered list; `HashMap` would lose file order.
fn ordered_pairs<'de, D>(deserializer: D) -> Result<Vec<Instrument>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<Instrument>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping pair names to ticker symbols")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, ticker)) = map.next_entry::<String, String>()? {
                out.push(Instrument::new(name, ticker));
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}

/// Push-channel credentials. The token never appears in `Debug` output.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub channel_token: SecretString,
    pub user_id: String,
}

impl Credentials {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let channel_token = first_present(&lookup, &TOKEN_VARS)
            .ok_or(ConfigError::MissingCredential(TOKEN_VARS[0]))?;
        let user_id =
            first_present(&lookup, &USER_VARS).ok_or(ConfigError::MissingCredential(USER_VARS[0]))?;

        Ok(Self {
            channel_token: SecretString::new(channel_token),
            user_id,
        })
    }

    pub fn token_present(&self) -> bool {
        !self.channel_token.expose_secret().is_empty()
    }
}

fn first_present<F>(lookup: &F, names: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .filter_map(|name| lookup(*name))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// `GITHUB_ACTIONS=true` selects one-shot; anything else is continuous.
pub fn schedule_mode_from_lookup<F>(lookup: F) -> ScheduleMode
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(ONE_SHOT_FLAG) {
        Some(v) if v.trim().eq_ignore_ascii_case("true") => ScheduleMode::OneShot,
        _ => ScheduleMode::Continuous,
    }
}

/// Fully resolved startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub file: ConfigFile,
    pub credentials: Credentials,
    pub mode: ScheduleMode,
}

impl AppConfig {
    /// Loads from `path` and the real process environment.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    pub fn load_with<F>(path: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = ConfigFile::load(path)?;
        let credentials = Credentials::from_lookup(&lookup)?;
        let mode = schedule_mode_from_lookup(&lookup);

        Ok(Self {
            file,
            credentials,
            mode,
        })
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            instruments: self.file.pairs.clone(),
            thresholds: self.file.mochipoyo,
            granularity: self.file.interval,
            lookback: self.file.period,
            poll_interval: Duration::from_secs(self.file.poll_interval_secs),
            recipient: self.credentials.user_id.clone(),
        }
    }
}
