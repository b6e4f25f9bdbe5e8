use thiserror::Error;

/// Invalid strategy configuration, raised before any match is processed
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid static tip '{0}': expected two non-negative integers like 2:1")]
    InvalidStaticTip(String),
}

/// Failures talking to the tipping website
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected response status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Element not found on page: {0}")]
    MissingElement(String),

    #[error("Login failed after {0} attempts")]
    LoginFailed(usize),
}
