// src/error.rs

//! Unified error handling for the tweet loader.

use std::fmt;

use thiserror::Error;

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credentials were malformed or rejected by the API
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Twitter API returned a non-success status
    #[error("Twitter API error {status}: {message}")]
    Api { status: u16, message: String },

    /// A timeline element did not have the expected post shape
    #[error("Malformed post #{index} in timeline of {user}: {message}")]
    MalformedPost {
        user: String,
        index: usize,
        message: String,
    },

    /// A post could not be mapped to a document
    #[error("Mapping error for post {post_id}: {message}")]
    Mapping { post_id: u64, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create a malformed post error with timeline context.
    pub fn malformed_post(user: impl Into<String>, index: usize, message: impl fmt::Display) -> Self {
        Self::MalformedPost {
            user: user.into(),
            index,
            message: message.to_string(),
        }
    }

    /// Create a mapping error for a post.
    pub fn mapping(post_id: u64, message: impl fmt::Display) -> Self {
        Self::Mapping {
            post_id,
            message: message.to_string(),
        }
    }
}
