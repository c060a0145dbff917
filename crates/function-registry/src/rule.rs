// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Rewrite strategies
//!
//! Each registry entry owns its own [`RewriteRule`] value. Rules carry no
//! mutable state, so applying one never affects another key.

use crate::RewriteTemplate;
use crate::builtin::clickhouse;
use dialect_rewrite_ir::{DialectVersion, FunctionCall, RewriteError, RewriteResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a registered rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSource {
    /// Static direct mappings and dialect-specific transforms
    BuiltIn,
    /// Static markers for functions the dialect can never render
    UnsupportedMarker,
    /// Versioned, externally supplied rewrite templates
    Config,
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RuleSource::BuiltIn => "built-in",
            RuleSource::UnsupportedMarker => "unsupported-marker",
            RuleSource::Config => "config",
        })
    }
}

/// How `date_parse` treats its format argument, fixed per dialect version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateParseStrategy {
    /// `parseDateTime(value, format)` with the format kept
    Format,
    /// `parseDateTimeBestEffort(value)`, limited to unambiguous year-first layouts
    BestEffort,
}

impl DateParseStrategy {
    pub fn for_version(version: DialectVersion) -> Self {
        if version >= clickhouse::PARSE_DATE_TIME_MIN_VERSION {
            DateParseStrategy::Format
        } else {
            DateParseStrategy::BestEffort
        }
    }
}

/// Dialect-specific structural transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomRewrite {
    /// `from_base64(x)` -> `base64Decode(x)`
    FromBase64,
    /// `date_parse(value, format)` -> `parseDateTime` or `parseDateTimeBestEffort`
    DateParse(DateParseStrategy),
}

/// A strategy for translating one canonical function
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteRule {
    /// Render the engine-default call form under a dialect-native name
    DirectMap { target: String },
    /// Always fail: the dialect cannot express this function
    Unsupported,
    /// Substitute arguments into a version-scoped template
    Template(RewriteTemplate),
    /// Dedicated dialect-specific renderer
    Custom(CustomRewrite),
}

impl RewriteRule {
    pub fn direct(target: impl Into<String>) -> Self {
        RewriteRule::DirectMap {
            target: target.into(),
        }
    }

    /// Render the call under this rule
    pub fn apply(&self, connector: &str, call: &FunctionCall<'_>) -> RewriteResult<String> {
        match self {
            RewriteRule::DirectMap { target } => Ok(call.render_as(target)),
            RewriteRule::Unsupported => Err(RewriteError::unsupported_named(
                connector,
                format!("function {}", call.name),
            )),
            RewriteRule::Template(template) => template.apply(connector, call),
            RewriteRule::Custom(CustomRewrite::FromBase64) => {
                clickhouse::rewrite_from_base64(connector, call)
            }
            RewriteRule::Custom(CustomRewrite::DateParse(strategy)) => {
                clickhouse::rewrite_date_parse(connector, *strategy, call)
            }
        }
    }

    /// Short strategy label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            RewriteRule::DirectMap { .. } => "direct",
            RewriteRule::Unsupported => "unsupported",
            RewriteRule::Template(_) => "template",
            RewriteRule::Custom(_) => "custom",
        }
    }
}
