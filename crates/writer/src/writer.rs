// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expression renderers
//!
//! [`SqlQueryWriter`] renders one expression node per call from child text the
//! caller has already rendered. Every method carries an engine-default
//! rendering gated by the writer's [`CapabilityTable`]; a dialect supplies its
//! table and overrides only the renderings that differ.
//!
//! The caller walks the expression tree bottom-up. Renderers never see the tree
//! and keep no state between calls.

use crate::capability::CapabilityTable;
use crate::literal::{self, LiteralStyle};
use dialect_rewrite_ir::{
    ArithmeticOperator, ArithmeticSign, CurrentTimeFunction, ExtractField, FunctionCall, Literal,
    LogicalOperator, RewriteError, RewriteResult, Selection, SqlFeature, WindowFrameType,
};

/// Renders SQL text for one dialect
///
/// Implementors provide [`connector`](Self::connector) and
/// [`capabilities`](Self::capabilities); everything else has a default.
/// Writers are immutable after construction and may be shared across threads.
pub trait SqlQueryWriter: Send + Sync {
    /// Connector identity used in every failure
    fn connector(&self) -> &str;

    /// Capability table consulted before rendering
    fn capabilities(&self) -> &CapabilityTable;

    /// Lexical rules for string and double literals
    fn literal_style(&self) -> LiteralStyle {
        LiteralStyle::Standard
    }

    /// Fail unless the dialect renders `feature`
    fn gate(&self, feature: SqlFeature) -> RewriteResult<()> {
        self.capabilities().check(self.connector(), feature)
    }

    // =========================================================================
    // Literals
    // =========================================================================

    /// Typed literal in `TYPE 'value'` form
    fn generic_literal(&self, type_name: &str, value: &str) -> RewriteResult<String> {
        Ok(format!("{} {}", type_name, self.string_literal(value)))
    }

    fn string_literal(&self, value: &str) -> String {
        self.literal_style().quote(value)
    }

    fn double_literal(&self, value: f64) -> String {
        self.literal_style().double(value)
    }

    fn boolean_literal(&self, value: bool) -> String {
        value.to_string()
    }

    fn null_literal(&self) -> String {
        "null".to_string()
    }

    fn long_literal(&self, value: i64) -> String {
        value.to_string()
    }

    fn decimal_literal(&self, value: &str) -> String {
        value.to_string()
    }

    // =========================================================================
    // Predicates and operators
    // =========================================================================

    /// `(left OP right)`
    fn comparison_expression(
        &self,
        operator: &str,
        left: &str,
        right: &str,
    ) -> RewriteResult<String> {
        self.capabilities()
            .check_comparison_operator(self.connector(), operator)?;
        Ok(format!("({left} {operator} {right})"))
    }

    /// `(value LIKE pattern [ESCAPE escape])`
    fn like_predicate(
        &self,
        value: &str,
        pattern: &str,
        escape: Option<&str>,
    ) -> RewriteResult<String> {
        self.gate(SqlFeature::Like)?;
        match escape {
            Some(escape) => {
                self.gate(SqlFeature::LikeEscape)?;
                Ok(format!("({value} LIKE {pattern} ESCAPE {escape})"))
            }
            None => Ok(format!("({value} LIKE {pattern})")),
        }
    }

    fn arithmetic_binary(&self, operator: ArithmeticOperator, left: &str, right: &str) -> String {
        format!("({left} {} {right})", operator.token())
    }

    fn arithmetic_unary(&self, sign: ArithmeticSign, value: &str) -> String {
        format!("{}{value}", sign.token())
    }

    fn logical_binary(&self, operator: LogicalOperator, left: &str, right: &str) -> String {
        format!("({left} {} {right})", operator.keyword())
    }

    fn not_expression(&self, value: &str) -> String {
        format!("(NOT {value})")
    }

    fn is_null_predicate(&self, value: &str) -> String {
        format!("({value} IS NULL)")
    }

    fn is_not_null_predicate(&self, value: &str) -> String {
        format!("({value} IS NOT NULL)")
    }

    fn between_predicate(&self, value: &str, min: &str, max: &str) -> String {
        format!("({value} BETWEEN {min} AND {max})")
    }

    /// `(value IN (a, b))`; an empty list is malformed
    fn in_predicate(&self, value: &str, values: &[String]) -> RewriteResult<String> {
        if values.is_empty() {
            return Err(RewriteError::malformed(self.connector(), "IN list is empty"));
        }
        Ok(format!("({value} IN ({}))", values.join(", ")))
    }

    fn exists(&self, subquery: &str) -> RewriteResult<String> {
        self.gate(SqlFeature::Exists)?;
        Ok(format!("(EXISTS {subquery})"))
    }

    // =========================================================================
    // Conditionals
    // =========================================================================

    fn when_clause(&self, condition: &str, result: &str) -> String {
        format!("WHEN {condition} THEN {result}")
    }

    /// `(CASE WHEN .. THEN .. [ELSE default] END)` from rendered WHEN clauses
    fn searched_case(
        &self,
        when_clauses: &[String],
        default: Option<&str>,
    ) -> RewriteResult<String> {
        if when_clauses.is_empty() {
            return Err(RewriteError::malformed(
                self.connector(),
                "CASE without WHEN clauses",
            ));
        }
        let mut sql = format!("(CASE {}", when_clauses.join(" "));
        if let Some(default) = default {
            sql.push_str(" ELSE ");
            sql.push_str(default);
        }
        sql.push_str(" END)");
        Ok(sql)
    }

    fn coalesce(&self, arguments: &[String]) -> String {
        format!("COALESCE({})", arguments.join(", "))
    }

    fn null_if(&self, first: &str, second: &str) -> String {
        format!("NULLIF({first}, {second})")
    }

    fn try_expression(&self, inner: &str) -> RewriteResult<String> {
        self.gate(SqlFeature::Try)?;
        Ok(format!("TRY({inner})"))
    }

    // =========================================================================
    // Types and time
    // =========================================================================

    /// `CAST(expr AS type)`, or `TRY_CAST` when a safe cast is requested
    fn cast(&self, expression: &str, type_name: &str, is_safe: bool) -> RewriteResult<String> {
        self.gate(SqlFeature::Cast)?;
        if is_safe {
            self.gate(SqlFeature::TryCast)?;
            return Ok(format!("TRY_CAST({expression} AS {type_name})"));
        }
        Ok(format!("CAST({expression} AS {type_name})"))
    }

    /// `EXTRACT(FIELD FROM expr)`
    fn extract(&self, expression: &str, field: ExtractField) -> RewriteResult<String> {
        self.capabilities()
            .check_extract_field(self.connector(), field)?;
        Ok(format!("EXTRACT({field} FROM {expression})"))
    }

    fn at_time_zone(&self, value: &str, time_zone: &str) -> RewriteResult<String> {
        self.gate(SqlFeature::AtTimeZone)?;
        Ok(format!("({value} AT TIME ZONE {time_zone})"))
    }

    fn current_time(
        &self,
        function: CurrentTimeFunction,
        precision: Option<u32>,
    ) -> RewriteResult<String> {
        self.gate(SqlFeature::CurrentTime)?;
        Ok(match precision {
            Some(precision) => format!("{}({precision})", function.keyword()),
            None => function.keyword().to_string(),
        })
    }

    fn current_user(&self) -> RewriteResult<String> {
        self.gate(SqlFeature::CurrentUser)?;
        Ok("CURRENT_USER".to_string())
    }

    fn current_path(&self) -> RewriteResult<String> {
        self.gate(SqlFeature::CurrentPath)?;
        Ok("CURRENT_PATH".to_string())
    }

    // =========================================================================
    // Structured values
    // =========================================================================

    /// `ARRAY(v1, v2, ...)`
    fn array_constructor(&self, values: &[String]) -> RewriteResult<String> {
        self.gate(SqlFeature::ArrayConstructor)?;
        Ok(format!("ARRAY({})", values.join(", ")))
    }

    fn row(&self, expressions: &[String]) -> RewriteResult<String> {
        self.gate(SqlFeature::RowConstructor)?;
        Ok(format!("ROW ({})", expressions.join(", ")))
    }

    fn subscript(&self, base: &str, index: &str) -> RewriteResult<String> {
        self.gate(SqlFeature::Subscript)?;
        Ok(format!("{base}[{index}]"))
    }

    fn dereference(&self, base: &str, field: &str) -> RewriteResult<String> {
        self.gate(SqlFeature::Dereference)?;
        Ok(format!("{base}.{field}"))
    }

    /// Bind captured values to a lambda
    fn bind(&self, values: &[String], function: &str) -> RewriteResult<String> {
        self.gate(SqlFeature::Bind)?;
        let mut arguments = values.to_vec();
        arguments.push(function.to_string());
        Ok(format!("BIND({})", arguments.join(", ")))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// `SELECT e1, e2 AS a2 FROM from`
    fn select(&self, selections: &[Selection], from: &str) -> String {
        let columns: Vec<String> = selections.iter().map(Selection::render).collect();
        format!("SELECT {} FROM {from}", columns.join(", "))
    }

    /// Assemble an aggregating SELECT
    ///
    /// Non-empty grouping keys append ` GROUP BY k1, k2` to `from`. A grouping-id
    /// element without explicit keys requires grouping sets.
    fn aggregation(
        &self,
        selections: &[Selection],
        grouping_keys: Option<&[String]>,
        group_id_element: Option<&str>,
        from: &str,
    ) -> RewriteResult<String> {
        self.gate(SqlFeature::Aggregation)?;
        let mut source = from.to_string();
        match (grouping_keys, group_id_element) {
            (Some(keys), _) => {
                if !keys.is_empty() {
                    source.push_str(" GROUP BY ");
                    source.push_str(&keys.join(", "));
                }
            }
            (None, Some(element)) => {
                self.gate(SqlFeature::GroupingSets)?;
                source.push_str(" GROUP BY ");
                source.push_str(element);
            }
            (None, None) => {}
        }
        Ok(self.select(selections, &source))
    }

    fn grouping_operation(&self, columns: &[String]) -> RewriteResult<String> {
        self.gate(SqlFeature::Grouping)?;
        Ok(format!("GROUPING({})", columns.join(", ")))
    }

    // =========================================================================
    // Function calls and windows
    // =========================================================================

    /// Render a function call
    ///
    /// FILTER and OVER are gated before the call reaches
    /// [`rewrite_function`](Self::rewrite_function), so every route fails
    /// for a dialect without them.
    fn function_call(&self, call: &FunctionCall<'_>) -> RewriteResult<String> {
        self.gate(SqlFeature::FunctionCall)?;
        if call.filter.is_some() {
            self.gate(SqlFeature::Filter)?;
        }
        if call.window.is_some() {
            self.gate(SqlFeature::WindowFunction)?;
        }
        self.rewrite_function(call)
    }

    /// Dialect function surface; defaults to the plain call rendering
    fn rewrite_function(&self, call: &FunctionCall<'_>) -> RewriteResult<String> {
        Ok(call.render_default())
    }

    /// `(WHERE value)`
    fn filter(&self, value: &str) -> RewriteResult<String> {
        self.gate(SqlFeature::Filter)?;
        Ok(format!("(WHERE {value})"))
    }

    fn format_window_column(
        &self,
        function_name: &str,
        arguments: &[String],
        window: &str,
    ) -> RewriteResult<String> {
        self.gate(SqlFeature::WindowFunction)?;
        Ok(format!("{function_name}({}) OVER {window}", arguments.join(", ")))
    }

    /// `(PARTITION BY a, b ORDER BY o frame)`
    fn window(
        &self,
        partition_by: &[String],
        order_by: Option<&str>,
        frame: Option<&str>,
    ) -> RewriteResult<String> {
        self.gate(SqlFeature::WindowSpecification)?;
        let mut parts = Vec::new();
        if !partition_by.is_empty() {
            parts.push(format!("PARTITION BY {}", partition_by.join(", ")));
        }
        if let Some(order_by) = order_by {
            parts.push(format!("ORDER BY {order_by}"));
        }
        if let Some(frame) = frame {
            parts.push(frame.to_string());
        }
        Ok(format!("({})", parts.join(" ")))
    }

    fn window_frame(
        &self,
        frame_type: WindowFrameType,
        start: &str,
        end: Option<&str>,
    ) -> RewriteResult<String> {
        self.gate(SqlFeature::WindowFrame)?;
        Ok(match end {
            Some(end) => format!("{} BETWEEN {start} AND {end}", frame_type.keyword()),
            None => format!("{} {start}", frame_type.keyword()),
        })
    }
}

/// Render a typed literal with a writer's literal style
pub(crate) fn typed_literal<W: SqlQueryWriter + ?Sized>(
    writer: &W,
    type_name: &str,
    value: &str,
) -> RewriteResult<String> {
    literal::format_literal(
        writer.connector(),
        writer.literal_style(),
        Literal::new(type_name, value),
    )
}

/// Engine-neutral writer that renders every construct
///
/// Useful as a reference rendering and for tests of the default methods.
#[derive(Debug, Clone)]
pub struct BaseQueryWriter {
    connector: String,
    capabilities: CapabilityTable,
}

impl BaseQueryWriter {
    pub fn new(connector: impl Into<String>) -> Self {
        Self {
            connector: connector.into(),
            capabilities: CapabilityTable::standard(),
        }
    }

    /// Replace the capability table
    pub fn with_capabilities(mut self, capabilities: CapabilityTable) -> Self {
        self.capabilities = capabilities;
        self
    }
}

impl Default for BaseQueryWriter {
    fn default() -> Self {
        Self::new("base")
    }
}

impl SqlQueryWriter for BaseQueryWriter {
    fn connector(&self) -> &str {
        &self.connector
    }

    fn capabilities(&self) -> &CapabilityTable {
        &self.capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialect_rewrite_ir::FunctionIdentity;

    fn base() -> BaseQueryWriter {
        BaseQueryWriter::default()
    }

    #[test]
    fn test_default_literals() {
        let w = base();
        assert_eq!(w.generic_literal("DATE", "2024-01-01").unwrap(), "DATE '2024-01-01'");
        assert_eq!(w.string_literal("it's"), "'it''s'");
        assert_eq!(w.boolean_literal(true), "true");
        assert_eq!(w.null_literal(), "null");
        assert_eq!(w.long_literal(-7), "-7");
        assert_eq!(w.decimal_literal("12.50"), "12.50");
        assert_eq!(w.double_literal(0.5), "5E-1");
    }

    #[test]
    fn test_typed_literal_uses_style() {
        let w = base();
        assert_eq!(typed_literal(&w, "varchar", "a'b").unwrap(), "'a''b'");
        assert!(typed_literal(&w, "date", "x").is_err());
    }

    #[test]
    fn test_cast_and_try_cast() {
        let w = base();
        assert_eq!(w.cast("x", "bigint", false).unwrap(), "CAST(x AS bigint)");
        assert_eq!(w.cast("x", "bigint", true).unwrap(), "TRY_CAST(x AS bigint)");
    }

    #[test]
    fn test_gate_applies_to_defaults() {
        const NO_EXISTS: CapabilityTable = CapabilityTable::new(
            &[SqlFeature::Exists],
            crate::capability::STANDARD_COMPARISON_OPERATORS,
            None,
        );
        let w = BaseQueryWriter::new("narrow").with_capabilities(NO_EXISTS);
        let err = w.exists("(SELECT 1)").unwrap_err();
        assert_eq!(err.to_string(), "narrow connector does not support exists");
        assert!(w.subscript("a", "1").is_ok());
    }

    #[test]
    fn test_function_call_default() {
        let w = base();
        let name = FunctionIdentity::new("lower");
        let args = vec!["name".to_string()];
        let call = FunctionCall::new(&name, &args).with_filter(Some("(WHERE x > 1)"));
        assert_eq!(
            w.function_call(&call).unwrap(),
            "lower(name) FILTER (WHERE x > 1)"
        );
    }

    #[test]
    fn test_aggregation_grouping_id() {
        let w = base();
        let selections = vec![Selection::new("a")];
        assert_eq!(
            w.aggregation(&selections, None, Some("groupid"), "t").unwrap(),
            "SELECT a FROM t GROUP BY groupid"
        );
    }
}
