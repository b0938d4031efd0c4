use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot read calendar configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed calendar configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("calendar configuration has an empty weekday set")]
    NoTradingWeekdays
}
