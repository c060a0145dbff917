// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Render-time errors
//!
//! Every failure names the connector and the offending construct, function or
//! type, so the compiling layer can report it without inspecting writer state.
//! Nothing is retried or partially rendered: a failed node fails the query.

use crate::SqlFeature;
use serde::Serialize;

/// Result type alias for render operations
pub type RewriteResult<T> = Result<T, RewriteError>;

/// Errors raised while rendering a single expression node
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum RewriteError {
    /// A construct this dialect cannot render
    #[error("{connector} connector does not support {feature}")]
    UnsupportedFeature { connector: String, feature: String },

    /// A canonical type with no literal form in this dialect
    #[error("{connector} connector does not support data type {type_name}")]
    UnsupportedType {
        connector: String,
        type_name: String,
    },

    /// An internally inconsistent request from the caller
    #[error("Malformed request for {connector} connector: {message}")]
    MalformedRequest { connector: String, message: String },
}

impl RewriteError {
    /// Unsupported construct identified by a feature-gate key
    pub fn unsupported(connector: &str, feature: SqlFeature) -> Self {
        Self::unsupported_named(connector, feature.name())
    }

    /// Unsupported construct identified by free text (operator, field, function)
    pub fn unsupported_named(connector: &str, feature: impl Into<String>) -> Self {
        RewriteError::UnsupportedFeature {
            connector: connector.to_string(),
            feature: feature.into(),
        }
    }

    pub fn unsupported_type(connector: &str, type_name: impl Into<String>) -> Self {
        RewriteError::UnsupportedType {
            connector: connector.to_string(),
            type_name: type_name.into(),
        }
    }

    pub fn malformed(connector: &str, message: impl Into<String>) -> Self {
        RewriteError::MalformedRequest {
            connector: connector.to_string(),
            message: message.into(),
        }
    }

    /// Whether this is an unsupported-feature failure
    pub fn is_unsupported_feature(&self) -> bool {
        matches!(self, RewriteError::UnsupportedFeature { .. })
    }

    /// Connector that raised the error
    pub fn connector(&self) -> &str {
        match self {
            RewriteError::UnsupportedFeature { connector, .. }
            | RewriteError::UnsupportedType { connector, .. }
            | RewriteError::MalformedRequest { connector, .. } => connector,
        }
    }

    /// Name of the unsupported feature, if this is an unsupported-feature failure
    pub fn feature(&self) -> Option<&str> {
        match self {
            RewriteError::UnsupportedFeature { feature, .. } => Some(feature),
            _ => None,
        }
    }
}
