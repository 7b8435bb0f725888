use thiserror::Error;

/// Errors raised at the boundary to an external provider (Bedrock, YouTube, Google).
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Credentials or identifiers missing from the environment
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AWS error: {0}")]
    Aws(String),

    #[error("Transcript error: {0}")]
    Transcript(String),

    /// Provider answered, but not in the shape we expect
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
