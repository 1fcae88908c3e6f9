//! Error types

use thiserror::Error;

/// A landmark sequence that violates the perception contract
#[derive(Error, Debug)]
pub enum LandmarkError {
    #[error("hand has {0} landmarks, expected 21")]
    HandLength(usize),

    #[error("face has {0} landmarks, expected at least 468")]
    FaceLength(usize),

    #[error("malformed frame: {0}")]
    Malformed(String),
}

/// IP geolocation lookup failures
#[derive(Error, Debug)]
pub enum GeoError {
    #[error("geolocation request failed: {0}")]
    Request(String),

    #[error("geolocation service answered {0}")]
    Status(u16),

    #[error("geolocation response unusable: {0}")]
    Malformed(String),
}

/// Alert delivery failures
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("collector answered {0}")]
    Rejected(u16),

    #[error("delivery timed out")]
    Timeout,

    #[error("delivery failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            DeliveryError::Timeout
        } else {
            DeliveryError::Transport(e.to_string())
        }
    }
}

/// Persistent log failures
#[derive(Error, Debug)]
pub enum AlertLogError {
    #[error("cannot write alert log {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value: {0}")]
    Invalid(String),
}
