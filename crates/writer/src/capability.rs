// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Capability gate
//!
//! A declarative table of what a dialect can render, consulted by one gate
//! function before any node is rendered. Besides the per-feature switch the
//! table restricts the comparison operator tokens and EXTRACT fields the
//! dialect accepts.

use dialect_rewrite_ir::{ExtractField, RewriteError, RewriteResult, SqlFeature};
use tracing::trace;

/// Comparison operator tokens of the engine-neutral vocabulary
pub const STANDARD_COMPARISON_OPERATORS: &[&str] =
    &["=", "<>", "!=", "<", "<=", ">", ">=", "IS DISTINCT FROM"];

/// Declarative capability table for one dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityTable {
    /// Features that always fail
    unsupported: &'static [SqlFeature],
    /// Accepted comparison operator tokens
    comparison_operators: &'static [&'static str],
    /// Accepted EXTRACT fields; `None` accepts every field
    extract_fields: Option<&'static [ExtractField]>,
}

impl CapabilityTable {
    pub const fn new(
        unsupported: &'static [SqlFeature],
        comparison_operators: &'static [&'static str],
        extract_fields: Option<&'static [ExtractField]>,
    ) -> Self {
        Self {
            unsupported,
            comparison_operators,
            extract_fields,
        }
    }

    /// A table that supports every construct of the engine-neutral vocabulary
    pub const fn standard() -> Self {
        Self::new(&[], STANDARD_COMPARISON_OPERATORS, None)
    }

    pub fn supports(&self, feature: SqlFeature) -> bool {
        !self.unsupported.contains(&feature)
    }

    pub fn supports_comparison_operator(&self, operator: &str) -> bool {
        self.comparison_operators.iter().any(|op| *op == operator)
    }

    pub fn supports_extract_field(&self, field: ExtractField) -> bool {
        self.extract_fields.is_none_or(|fields| fields.contains(&field))
    }

    /// Features this table rejects
    pub fn unsupported_features(&self) -> &'static [SqlFeature] {
        self.unsupported
    }

    /// Gate a construct
    pub fn check(&self, connector: &str, feature: SqlFeature) -> RewriteResult<()> {
        if self.supports(feature) {
            Ok(())
        } else {
            trace!("{} rejects {}", connector, feature);
            Err(RewriteError::unsupported(connector, feature))
        }
    }

    /// Gate a comparison operator token
    pub fn check_comparison_operator(&self, connector: &str, operator: &str) -> RewriteResult<()> {
        self.check(connector, SqlFeature::Comparison)?;
        if self.supports_comparison_operator(operator) {
            Ok(())
        } else {
            Err(RewriteError::unsupported_named(
                connector,
                format!("comparison operator {operator}"),
            ))
        }
    }

    /// Gate an EXTRACT field
    pub fn check_extract_field(&self, connector: &str, field: ExtractField) -> RewriteResult<()> {
        self.check(connector, SqlFeature::Extract)?;
        if self.supports_extract_field(field) {
            Ok(())
        } else {
            Err(RewriteError::unsupported_named(
                connector,
                format!("extract field: {field}"),
            ))
        }
    }
}

impl Default for CapabilityTable {
    fn default() -> Self {
        Self::standard()
    }
}
