use crate::error::CampaignResult;
use serde::Deserialize;

/// Environment variable prefix, e.g. `CAMPAIGN_DASHBOARD__DATA__CSV_PATH`.
pub const ENV_PREFIX: &str = "CAMPAIGN_DASHBOARD";

/// Default config file location (extension resolved by the `config` crate).
pub const DEFAULT_CONFIG_FILE: &str = "config/dashboard";

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `CAMPAIGN_DASHBOARD__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub campaign: CampaignInfo,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Static CSV resource the dashboard is built from.
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
}

/// Display metadata for the dashboard header.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignInfo {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_artist")]
    pub artist: String,
    #[serde(default = "default_cover_art")]
    pub cover_art: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default functions
fn default_csv_path() -> String {
    "public/Completed_Engagement_Data.csv".to_string()
}
fn default_title() -> String {
    "Jailbreak".to_string()
}
fn default_artist() -> String {
    "Waylon Wyatt".to_string()
}
fn default_cover_art() -> String {
    "/coverart.jpeg".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9091
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

impl Default for CampaignInfo {
    fn default() -> Self {
        Self {
            title: default_title(),
            artist: default_artist(),
            cover_art: default_cover_art(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file (if present) and
    /// environment variables.
    pub fn load() -> CampaignResult<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from `file` (optional) layered under environment
    /// variables.
    pub fn load_from(file: &str) -> CampaignResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
