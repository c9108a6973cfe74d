use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("registry returned status {0}")]
    Status(StatusCode),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl RegistryError {
    /// Whether retrying the request could help. Server-side errors and
    /// network-level failures (timeouts, connection resets) are transient;
    /// a body that failed to parse is not.
    pub fn is_transient(&self) -> bool {
        match self {
            RegistryError::Network(_) => true,
            RegistryError::Status(status) => status.is_server_error(),
            RegistryError::Malformed(_) => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(
        "module {module} is {actual:.2} libyears behind, exceeding the maximum of {limit:.2}"
    )]
    ThresholdExceeded {
        module: String,
        limit: f32,
        actual: f32,
    },
}
