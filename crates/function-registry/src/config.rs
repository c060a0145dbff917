// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Versioned UDF rewrite configuration
//!
//! Externally supplied rewrite templates, keyed by connector identity and
//! scoped to a dialect version range.
//!
//! ```yaml
//! connectors:
//!   - connector: clickhouse
//!     rules:
//!       - function: levenshtein_distance
//!         template: "editDistance($1, $2)"
//!         minVersion: "23.9"
//!         arity: 2
//! ```
//!
//! `minVersion` is inclusive and `maxVersion` exclusive; both are optional.
//! The configuration is read once when a registry is built and is never
//! consulted again.

use crate::{RegistryError, RegistryResult, RewriteTemplate};
use dialect_rewrite_ir::{DialectVersion, FunctionIdentity};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A pure mapping from `(connector, version)` to the templates in force
pub trait RewriteConfigSupplier: Send + Sync {
    /// Templates that apply to `connector` at `version`
    fn templates(
        &self,
        connector: &str,
        version: DialectVersion,
    ) -> RegistryResult<Vec<(FunctionIdentity, RewriteTemplate)>>;
}

/// One versioned rewrite rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UdfRule {
    pub function: FunctionIdentity,
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<DialectVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_version: Option<DialectVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arity: Option<usize>,
}

impl UdfRule {
    pub fn new(function: impl Into<FunctionIdentity>, template: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            template: template.into(),
            min_version: None,
            max_version: None,
            arity: None,
        }
    }

    pub fn with_min_version(mut self, version: DialectVersion) -> Self {
        self.min_version = Some(version);
        self
    }

    pub fn with_max_version(mut self, version: DialectVersion) -> Self {
        self.max_version = Some(version);
        self
    }

    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Whether this rule is in force at `version`
    pub fn applies_to(&self, version: DialectVersion) -> bool {
        self.min_version.is_none_or(|min| version >= min)
            && self.max_version.is_none_or(|max| version < max)
    }

    fn validate_range(&self) -> RegistryResult<()> {
        if let (Some(min), Some(max)) = (self.min_version, self.max_version) {
            if min >= max {
                return Err(RegistryError::InvalidVersionRange {
                    function: self.function.to_string(),
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Rules for one connector
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorRules {
    pub connector: String,
    #[serde(default)]
    pub rules: Vec<UdfRule>,
}

/// Complete rule set, possibly covering several connectors
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UdfRewriteConfig {
    #[serde(default)]
    pub connectors: Vec<ConnectorRules>,
}

impl UdfRewriteConfig {
    /// Parse a rule set from YAML
    pub fn from_yaml(input: &str) -> RegistryResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    /// Parse a rule set from JSON
    pub fn from_json(input: &str) -> RegistryResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Add rules for a connector (builder style)
    pub fn with_rules(mut self, connector: impl Into<String>, rules: Vec<UdfRule>) -> Self {
        self.connectors.push(ConnectorRules {
            connector: connector.into(),
            rules,
        });
        self
    }

    /// Whether any rules are configured for `connector` (case-insensitive)
    pub fn has_connector(&self, connector: &str) -> bool {
        self.connectors
            .iter()
            .any(|c| c.connector.eq_ignore_ascii_case(connector))
    }

    /// All rules configured for `connector`, regardless of version
    pub fn rules_for<'a>(&'a self, connector: &'a str) -> impl Iterator<Item = &'a UdfRule> + 'a {
        self.connectors
            .iter()
            .filter(move |c| c.connector.eq_ignore_ascii_case(connector))
            .flat_map(|c| c.rules.iter())
    }
}

impl RewriteConfigSupplier for UdfRewriteConfig {
    fn templates(
        &self,
        connector: &str,
        version: DialectVersion,
    ) -> RegistryResult<Vec<(FunctionIdentity, RewriteTemplate)>> {
        let mut templates = Vec::new();
        for rule in self.rules_for(connector) {
            rule.validate_range()?;
            let template =
                RewriteTemplate::parse(rule.function.as_str(), &rule.template, rule.arity)?;
            if rule.applies_to(version) {
                templates.push((rule.function.clone(), template));
            } else {
                debug!(
                    "Skipping rewrite rule {} for {} {}: outside version range",
                    rule.function, connector, version
                );
            }
        }
        Ok(templates)
    }
}
