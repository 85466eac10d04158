use std::num::ParseIntError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    NoConfigDir,

    #[error("Data directory not found")]
    NoDataDir,

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The page loaded but markup inside an expected container did not match.
    #[error("Failed to extract {target}: {reason}")]
    Extraction {
        target: &'static str,
        reason: String,
    },

    #[error("Invalid episode number {value:?}: {source}")]
    InvalidEpisodeNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl Error {
    pub(crate) fn extraction(target: &'static str, reason: impl Into<String>) -> Self {
        Error::Extraction {
            target,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
