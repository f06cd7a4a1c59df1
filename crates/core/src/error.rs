use thiserror::Error;

pub type CampaignResult<T> = Result<T, CampaignError>;

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Data source error ({path}): {source}")]
    DataSource {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
