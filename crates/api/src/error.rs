use thiserror::Error;

/// Errors surfaced by gateway implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The server rejected the bearer token (HTTP 401). Callers treat this
    /// as a dead session: log out and return to the login screen.
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Any other non-2xx response. `detail` carries the server's
    /// `{"detail": ...}` message when one was present.
    #[error("request rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response decoding failed, or a decoded field fell outside the closed
    /// domain sets (unknown role id, bad completion flag, invalid link).
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors from the persisted session vault.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VaultError {
    #[error("vault io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("vault serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
