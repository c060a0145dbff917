// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! ClickHouse query writer
//!
//! ClickHouse renders comparisons, non-safe CAST, LIKE without ESCAPE, a
//! restricted EXTRACT, array constructors, aggregation with plain GROUP BY and
//! function calls routed through the rewrite registry. Everything listed in
//! [`CLICKHOUSE_CAPABILITIES`] as unsupported fails at the gate.

use crate::capability::CapabilityTable;
use crate::config::WriterConfig;
use crate::error::WriterResult;
use crate::literal::LiteralStyle;
use crate::writer::{SqlQueryWriter, typed_literal};
use dialect_rewrite_function_registry::builtin::clickhouse;
use dialect_rewrite_function_registry::{RewriteConfigSupplier, RewriteRegistry};
use dialect_rewrite_ir::{DialectVersion, ExtractField, FunctionCall, RewriteResult, SqlFeature};
use std::sync::Arc;
use tracing::info;

const CLICKHOUSE_UNSUPPORTED: &[SqlFeature] = &[
    SqlFeature::AtTimeZone,
    SqlFeature::RowConstructor,
    SqlFeature::CurrentUser,
    SqlFeature::CurrentPath,
    SqlFeature::CurrentTime,
    SqlFeature::Subscript,
    SqlFeature::Exists,
    SqlFeature::Dereference,
    SqlFeature::Bind,
    SqlFeature::Try,
    SqlFeature::Filter,
    SqlFeature::WindowFunction,
    SqlFeature::WindowSpecification,
    SqlFeature::WindowFrame,
    SqlFeature::Grouping,
    SqlFeature::GroupingSets,
    SqlFeature::TryCast,
    SqlFeature::LikeEscape,
];

const CLICKHOUSE_COMPARISON_OPERATORS: &[&str] = &["==", "=", ">", "<", ">=", "<=", "!=", "<>"];

const CLICKHOUSE_EXTRACT_FIELDS: &[ExtractField] = &[
    ExtractField::Year,
    ExtractField::Month,
    ExtractField::Day,
    ExtractField::Hour,
    ExtractField::Minute,
    ExtractField::Second,
];

/// What ClickHouse can render
pub const CLICKHOUSE_CAPABILITIES: CapabilityTable = CapabilityTable::new(
    CLICKHOUSE_UNSUPPORTED,
    CLICKHOUSE_COMPARISON_OPERATORS,
    Some(CLICKHOUSE_EXTRACT_FIELDS),
);

/// Query writer for the ClickHouse connector
///
/// The rewrite registry is resolved for the configured version at
/// construction and shared read-only by every clone of the writer.
///
/// # Examples
///
/// ```rust,ignore
/// let writer = ClickHouseQueryWriter::new(WriterConfig::default())?;
/// assert_eq!(writer.comparison_expression("==", "a", "1")?, "(a == 1)");
/// ```
#[derive(Debug, Clone)]
pub struct ClickHouseQueryWriter {
    config: WriterConfig,
    registry: Arc<RewriteRegistry>,
}

impl ClickHouseQueryWriter {
    /// Build a writer using the configured inline rules, or the shipped defaults
    pub fn new(config: WriterConfig) -> WriterResult<Self> {
        let rules = match &config.udf_rules {
            Some(rules) => rules.clone(),
            None => clickhouse::default_udf_rules()?,
        };
        Self::with_supplier(config, &rules)
    }

    /// Build a writer whose versioned rules come from `supplier`
    ///
    /// The supplier is consulted once; inline rules in `config` are ignored.
    pub fn with_supplier(
        config: WriterConfig,
        supplier: &dyn RewriteConfigSupplier,
    ) -> WriterResult<Self> {
        config.validate()?;

        let mut builder = RewriteRegistry::builder(config.connector.clone(), config.version)
            .conflict_policy(config.conflict_policy);
        builder.register_clickhouse_builtins()?;
        builder.register_supplier(supplier)?;
        let registry = builder.build();

        info!(
            "Built {} query writer for version {} with {} rewrite rules",
            config.connector,
            config.version,
            registry.len()
        );

        Ok(Self {
            config,
            registry: Arc::new(registry),
        })
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    pub fn version(&self) -> DialectVersion {
        self.config.version
    }

    pub fn registry(&self) -> &RewriteRegistry {
        &self.registry
    }
}

impl SqlQueryWriter for ClickHouseQueryWriter {
    fn connector(&self) -> &str {
        &self.config.connector
    }

    fn capabilities(&self) -> &CapabilityTable {
        &CLICKHOUSE_CAPABILITIES
    }

    fn literal_style(&self) -> LiteralStyle {
        LiteralStyle::ClickHouse
    }

    // https://clickhouse.com/docs/en/sql-reference/syntax#literals
    fn generic_literal(&self, type_name: &str, value: &str) -> RewriteResult<String> {
        typed_literal(self, type_name, value)
    }

    fn rewrite_function(&self, call: &FunctionCall<'_>) -> RewriteResult<String> {
        self.registry.rewrite(call)
    }
}
