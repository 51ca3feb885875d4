use std::path::PathBuf;

use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token algorithm is not accepted")]
    InvalidAlgorithm,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}

/// Error type for loading RSA key material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Failed to read key file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed key in {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}
