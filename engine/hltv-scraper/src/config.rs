use crate::error::ConfigError;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for the HLTV scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Rendering proxy configuration
    pub proxy: ProxyConfig,

    /// Timezone handling
    pub timezone: TimezoneConfig,

    /// Results pagination
    pub pagination: PaginationConfig,

    /// Directory that receives ranking.json, results.json and upcoming.json
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// FlareSolverr endpoint
    pub url: String,

    /// How long the proxy may spend solving a page, in milliseconds
    pub max_timeout_ms: u64,

    /// HTTP client timeout in seconds (must exceed max_timeout_ms)
    pub request_timeout_secs: u64,

    /// Referer header sent to the proxy
    pub referer: String,

    /// User-Agent header sent to the proxy
    pub user_agent: String,

    /// Forward the site timezone cookie with every request
    pub send_timezone_cookie: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimezoneConfig {
    /// Zone the site renders dates in (matches the hltvTimeZone cookie)
    pub source: String,

    /// Target zone; the host zone is used when unset
    pub local: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Results listing base URL
    pub results_url: String,

    /// Upper bound on the offset
    pub max_results: u32,

    /// Offset increment per page
    pub page_size: u32,

    /// Pause between page requests in milliseconds
    pub page_delay_ms: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            proxy: ProxyConfig {
                url: "http://localhost:8191/v1".to_string(),
                max_timeout_ms: 60_000,
                request_timeout_secs: 90,
                referer: "https://www.hltv.org/stats".to_string(),
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string(),
                send_timezone_cookie: false,
            },
            timezone: TimezoneConfig { source: "Europe/Copenhagen".to_string(), local: None },
            pagination: PaginationConfig {
                results_url: "https://www.hltv.org/results".to_string(),
                max_results: 50_000,
                page_size: 100,
                page_delay_ms: 1000,
            },
            output_dir: PathBuf::from("."),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from environment variables
    ///
    /// Starts from the TOML file named by `HLTV_CONFIG` when set, otherwise
    /// from the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ScraperConfig::from_env`], reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("HLTV_CONFIG") {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(url) = lookup("HLTV_PROXY_URL") {
            config.proxy.url = url;
        }

        if let Some(dir) = lookup("HLTV_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        if let Some(max) = lookup("HLTV_MAX_RESULTS") {
            config.pagination.max_results = parse_env("HLTV_MAX_RESULTS", &max)?;
        }

        if let Some(delay) = lookup("HLTV_PAGE_DELAY_MS") {
            config.pagination.page_delay_ms = parse_env("HLTV_PAGE_DELAY_MS", &delay)?;
        }

        if let Some(tz) = lookup("HLTV_LOCAL_TZ") {
            config.timezone.local = Some(tz);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ScraperConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject timezone names chrono-tz does not know and a zero page size
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.source_tz()?;
        self.local_tz()?;
        if self.pagination.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "pagination.page_size".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn source_tz(&self) -> Result<Tz, ConfigError> {
        parse_tz(&self.timezone.source)
    }

    /// `None` means the host zone
    pub fn local_tz(&self) -> Result<Option<Tz>, ConfigError> {
        self.timezone.local.as_deref().map(parse_tz).transpose()
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.pagination.page_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.proxy.request_timeout_secs)
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

fn parse_tz(name: &str) -> Result<Tz, ConfigError> {
    name.parse::<Tz>().map_err(|_| ConfigError::UnknownTimezone(name.to_string()))
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key: key.to_string(), value: value.to_string() })
}
