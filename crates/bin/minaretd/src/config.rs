//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `minaret.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use minaret_adapter_chromecast::ChromecastConfig;
use minaret_adapter_http_axum::state::MediaFiles;
use minaret_app::dispatcher::SettleTimings;
use minaret_app::scheduler::{DispatchMode, SchedulerConfig};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Where the schedule file lives.
    pub schedule: ScheduleConfig,
    /// The two call recordings.
    pub media: MediaConfig,
    /// Playback device settings.
    pub device: DeviceConfig,
    /// Scheduler loop and dispatch timings.
    pub scheduler: SchedulerSection,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// JSON file with one record per date.
    pub path: PathBuf,
}

/// Call recordings and the URL devices fetch them from.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub regular_path: PathBuf,
    pub fajr_path: PathBuf,
    /// Base URL devices use to reach this server. Defaults to
    /// `http://<local-ip>:<port>`.
    pub base_url: Option<String>,
}

/// Which device backend to drive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Cast devices found over mDNS.
    #[default]
    Chromecast,
    /// Simulated speakers, for demos.
    Virtual,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chromecast" => Ok(Self::Chromecast),
            "virtual" => Ok(Self::Virtual),
            other => Err(ConfigError::Validation(format!("unknown device backend {other:?}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub backend: Backend,
    /// Device selected at startup. Without one the first discovered device
    /// is selected.
    pub preferred: Option<String>,
    /// How long one discovery pass listens (milliseconds).
    pub discovery_timeout_ms: u64,
}

/// Scheduler loop settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SchedulerSection {
    /// Start the scheduler as soon as the server is up.
    pub autostart: bool,
    pub poll_interval_secs: u64,
    pub idle_poll_interval_secs: u64,
    /// Warn about an empty schedule once every this many idle polls.
    pub idle_warning_every: u32,
    /// Wait after loading media before reading the player state.
    pub settle_secs: u64,
    /// Wait after a forced play before the final state read.
    pub verify_secs: u64,
    pub dispatch_mode: DispatchMode,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `minaret.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("minaret.toml")?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("MINARET_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("MINARET_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("MINARET_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("MINARET_SCHEDULE") {
            self.schedule.path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("MINARET_DEVICE") {
            self.device.preferred = Some(val);
        }
        if let Ok(val) = std::env::var("MINARET_BACKEND") {
            self.device.backend = val.parse()?;
        }
        if let Ok(val) = std::env::var("MINARET_BASE_URL") {
            self.media.base_url = Some(val);
        }
        if let Ok(val) = std::env::var("MINARET_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.scheduler.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "scheduler.poll_interval_secs must be non-zero".to_string(),
            ));
        }
        if self.scheduler.idle_poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "scheduler.idle_poll_interval_secs must be non-zero".to_string(),
            ));
        }
        if self.scheduler.idle_warning_every == 0 {
            return Err(ConfigError::Validation(
                "scheduler.idle_warning_every must be non-zero".to_string(),
            ));
        }
        if self
            .device
            .preferred
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ConfigError::Validation(
                "device.preferred must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Base URL the recordings are served under, given the detected local
    /// address.
    #[must_use]
    pub fn base_url(&self, local_ip: std::net::IpAddr) -> String {
        self.media
            .base_url
            .clone()
            .unwrap_or_else(|| format!("http://{local_ip}:{}", self.server.port))
    }

    #[must_use]
    pub fn media_files(&self) -> MediaFiles {
        MediaFiles {
            regular: self.media.regular_path.clone(),
            fajr: self.media.fajr_path.clone(),
        }
    }

    #[must_use]
    pub fn chromecast(&self) -> ChromecastConfig {
        ChromecastConfig {
            discovery_timeout_ms: self.device.discovery_timeout_ms,
        }
    }

    #[must_use]
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            poll_interval: Duration::from_secs(self.scheduler.poll_interval_secs),
            idle_poll_interval: Duration::from_secs(self.scheduler.idle_poll_interval_secs),
            idle_warning_every: self.scheduler.idle_warning_every,
            dispatch_mode: self.scheduler.dispatch_mode,
        }
    }

    #[must_use]
    pub fn settle_timings(&self) -> SettleTimings {
        SettleTimings {
            settle: Duration::from_secs(self.scheduler.settle_secs),
            verify: Duration::from_secs(self.scheduler.verify_secs),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("prayer_times.json"),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            regular_path: PathBuf::from("adhan.mp3"),
            fajr_path: PathBuf::from("fajradhan.mp3"),
            base_url: None,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Chromecast,
            preferred: None,
            discovery_timeout_ms: ChromecastConfig::default().discovery_timeout_ms,
        }
    }
}

impl Default for SchedulerSection {
    fn default() -> Self {
        let loop_defaults = SchedulerConfig::default();
        let timings = SettleTimings::default();
        Self {
            autostart: true,
            poll_interval_secs: loop_defaults.poll_interval.as_secs(),
            idle_poll_interval_secs: loop_defaults.idle_poll_interval.as_secs(),
            idle_warning_every: loop_defaults.idle_warning_every,
            settle_secs: timings.settle.as_secs(),
            verify_secs: timings.verify.as_secs(),
            dispatch_mode: loop_defaults.dispatch_mode,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "minaretd=info,minaret=info,tower_http=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.schedule.path, PathBuf::from("prayer_times.json"));
        assert_eq!(config.media.regular_path, PathBuf::from("adhan.mp3"));
        assert_eq!(config.media.fajr_path, PathBuf::from("fajradhan.mp3"));
        assert_eq!(config.device.backend, Backend::Chromecast);
        assert_eq!(config.device.discovery_timeout_ms, 3000);
        assert!(config.scheduler.autostart);
        assert_eq!(config.scheduler.dispatch_mode, DispatchMode::Detached);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [schedule]
            path = '/etc/minaret/times.json'

            [media]
            regular_path = 'calls/adhan.mp3'
            fajr_path = 'calls/fajr.mp3'
            base_url = 'http://speakers.lan:9090'

            [device]
            backend = 'virtual'
            preferred = 'Kitchen Display'
            discovery_timeout_ms = 500

            [scheduler]
            autostart = false
            poll_interval_secs = 5
            idle_poll_interval_secs = 2
            idle_warning_every = 30
            settle_secs = 3
            verify_secs = 1
            dispatch_mode = 'inline'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.schedule.path, PathBuf::from("/etc/minaret/times.json"));
        assert_eq!(config.media.fajr_path, PathBuf::from("calls/fajr.mp3"));
        assert_eq!(config.device.backend, Backend::Virtual);
        assert_eq!(config.device.preferred.as_deref(), Some("Kitchen Display"));
        assert_eq!(config.chromecast().discovery_timeout_ms, 500);
        assert!(!config.scheduler.autostart);
        assert_eq!(config.scheduler.dispatch_mode, DispatchMode::Inline);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_poll_interval() {
        let mut config = Config::default();
        config.scheduler.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_idle_poll_interval() {
        let mut config = Config::default();
        config.scheduler.idle_poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_idle_warning_cadence() {
        let mut config = Config::default();
        config.scheduler.idle_warning_every = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_blank_preferred_device() {
        let mut config = Config::default();
        config.device.preferred = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_derive_base_url_from_local_ip() {
        let config = Config::default();
        let ip = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20));
        assert_eq!(config.base_url(ip), "http://192.168.1.20:5000");
    }

    #[test]
    fn should_prefer_configured_base_url() {
        let mut config = Config::default();
        config.media.base_url = Some("http://speakers.lan:8080".to_string());
        let ip = IpAddr::V4(Ipv4Addr::LOCALHOST);
        assert_eq!(config.base_url(ip), "http://speakers.lan:8080");
    }

    #[test]
    fn should_convert_scheduler_section_to_durations() {
        let config = Config::default();
        let scheduler = config.scheduler_config();
        assert_eq!(scheduler.poll_interval, Duration::from_secs(10));
        assert_eq!(scheduler.idle_poll_interval, Duration::from_secs(1));
        assert_eq!(scheduler.idle_warning_every, 60);
        let timings = config.settle_timings();
        assert_eq!(timings.settle, Duration::from_secs(5));
        assert_eq!(timings.verify, Duration::from_secs(2));
    }

    #[test]
    fn should_parse_backend_case_insensitively() {
        assert_eq!("Virtual".parse::<Backend>().unwrap(), Backend::Virtual);
        assert!("bluetooth".parse::<Backend>().is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
