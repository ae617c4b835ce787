//! Error types for Monkeyroute
//!
//! Routing itself never fails on degenerate input; errors only arise while
//! loading configuration or building a router from a catalog.

use crate::router::ModelTier;
use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration in {path}: {reason}")]
    ConfigValidationFailed { path: String, reason: String },

    #[error("Tier '{tier}' references model '{model_id}' which is not in the catalog")]
    MissingTierModel { tier: ModelTier, model_id: String },

    #[error("Tiers '{first}' and '{second}' both resolve to model '{model_id}'")]
    DuplicateTierModel {
        model_id: String,
        first: ModelTier,
        second: ModelTier,
    },

    #[error("Invalid input: {0}")]
    Validation(String),
}

/// Convenience type alias for Results
pub type AppResult<T> = Result<T, AppError>;
