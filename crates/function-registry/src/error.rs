// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Construction-time errors for the rewrite registry

use crate::RuleSource;
use dialect_rewrite_ir::DialectVersion;
use thiserror::Error;

/// Result type alias for registry construction
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur while building a registry or loading rule configuration
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two rules claim the same function identity
    #[error("Function '{function}' is already registered by {existing} rules; {incoming} rule conflicts with it")]
    Conflict {
        function: String,
        existing: RuleSource,
        incoming: RuleSource,
    },

    /// A rewrite template that cannot be applied
    #[error("Invalid rewrite template for '{function}': {reason}")]
    InvalidTemplate { function: String, reason: String },

    /// A rule whose version range is empty
    #[error("Invalid version range for '{function}': {min} is not below {max}")]
    InvalidVersionRange {
        function: String,
        min: DialectVersion,
        max: DialectVersion,
    },

    /// Rule configuration could not be parsed as YAML
    #[error("Failed to parse rewrite rule configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Rule configuration could not be parsed as JSON
    #[error("Failed to parse rewrite rule configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegistryError {
    /// Whether this is a duplicate-registration conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, RegistryError::Conflict { .. })
    }
}
