// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Writer configuration
//!
//! Settings fixed for a writer's lifetime: connector identity, negotiated
//! dialect version, registry conflict policy and an optional inline UDF rule
//! set replacing the shipped defaults.
//!
//! ## Example
//!
//! ```yaml
//! connector: clickhouse
//! version: "23.9"
//! conflictPolicy: override
//! udfRules:
//!   connectors:
//!     - connector: clickhouse
//!       rules:
//!         - function: levenshtein_distance
//!           template: "editDistance($1, $2)"
//!           minVersion: "23.9"
//! ```

use crate::error::ConfigError;
use dialect_rewrite_function_registry::{ConflictPolicy, UdfRewriteConfig};
use dialect_rewrite_ir::{Dialect, DialectVersion};
use serde::{Deserialize, Serialize};

/// Construction-time settings for a query writer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriterConfig {
    /// Connector identity used in diagnostics and rule lookup
    pub connector: String,

    /// Negotiated dialect version
    pub version: DialectVersion,

    /// How configured rules treat identities claimed by built-ins
    pub conflict_policy: ConflictPolicy,

    /// Inline UDF rules; `None` uses the rules shipped with the connector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udf_rules: Option<UdfRewriteConfig>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            connector: Dialect::ClickHouse.connector_name().to_string(),
            version: DialectVersion::default(),
            conflict_policy: ConflictPolicy::default(),
            udf_rules: None,
        }
    }
}

impl WriterConfig {
    pub fn new(version: DialectVersion) -> Self {
        Self {
            version,
            ..Default::default()
        }
    }

    pub fn from_yaml(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn with_udf_rules(mut self, rules: UdfRewriteConfig) -> Self {
        self.udf_rules = Some(rules);
        self
    }

    /// Dialect named by the connector identity
    pub fn dialect(&self) -> Option<Dialect> {
        Dialect::from_connector_name(&self.connector)
    }

    /// Check the configuration before a writer is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connector.trim().is_empty() {
            return Err(ConfigError::EmptyConnector);
        }
        if self.dialect().is_none() {
            return Err(ConfigError::UnknownConnector {
                connector: self.connector.clone(),
            });
        }
        match &self.udf_rules {
            Some(rules) if !rules.has_connector(&self.connector) => {
                Err(ConfigError::MissingConnectorRules {
                    connector: self.connector.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}
