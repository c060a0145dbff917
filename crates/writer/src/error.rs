// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Construction-time errors for query writers
//!
//! Render-time failures are [`RewriteError`](dialect_rewrite_ir::RewriteError)
//! values; the errors here only arise while a writer is being built.

use dialect_rewrite_function_registry::RegistryError;

/// Result type alias for writer construction
pub type WriterResult<T> = Result<T, WriterError>;

/// Invalid writer configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Connector identity is blank
    #[error("Connector name must not be empty")]
    EmptyConnector,

    /// Connector identity names no known dialect
    #[error("Unknown connector: {connector}")]
    UnknownConnector { connector: String },

    /// Inline UDF rules carry no section for the configured connector
    #[error("UDF rules have no section for connector {connector}")]
    MissingConnectorRules { connector: String },

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while building a writer
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}
