// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Literal & type formatting
//!
//! Converts a canonical type name plus raw literal text into dialect literal
//! syntax. Integer-family and `real` values pass through, `double` values are
//! re-parsed and emitted in the canonical double form, character values are
//! quoted. Everything else has no literal form and fails with
//! [`RewriteError::UnsupportedType`].

use dialect_rewrite_ir::{CanonicalType, Literal, RewriteError, RewriteResult};

/// Lexical rules a dialect uses for string and double literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiteralStyle {
    /// ANSI quoting: a single quote is doubled
    #[default]
    Standard,
    /// Backslash escapes inside single quotes; `nan`/`inf` constants
    ClickHouse,
}

impl LiteralStyle {
    /// Quote a string literal
    pub fn quote(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for c in value.chars() {
            match (self, c) {
                (LiteralStyle::Standard, '\'') => out.push_str("''"),
                (LiteralStyle::ClickHouse, '\\') => out.push_str("\\\\"),
                (LiteralStyle::ClickHouse, '\'') => out.push_str("\\'"),
                _ => out.push(c),
            }
        }
        out.push('\'');
        out
    }

    /// Canonical double literal
    pub fn double(&self, value: f64) -> String {
        if value.is_nan() {
            return match self {
                LiteralStyle::Standard => "nan()".to_string(),
                LiteralStyle::ClickHouse => "nan".to_string(),
            };
        }
        if value.is_infinite() {
            let negative = value.is_sign_negative();
            return match (self, negative) {
                (LiteralStyle::Standard, false) => "infinity()".to_string(),
                (LiteralStyle::Standard, true) => "-infinity()".to_string(),
                (LiteralStyle::ClickHouse, false) => "inf".to_string(),
                (LiteralStyle::ClickHouse, true) => "-inf".to_string(),
            };
        }
        format!("{value:E}")
    }
}

/// Parse raw double text
pub fn parse_double(connector: &str, value: &str) -> RewriteResult<f64> {
    value.trim().parse::<f64>().map_err(|_| {
        RewriteError::malformed(connector, format!("'{value}' is not a valid double literal"))
    })
}

/// Render a typed literal
///
/// # Examples
///
/// ```rust,ignore
/// let literal = Literal::new("double", "3.5");
/// let sql = format_literal("clickhouse", LiteralStyle::ClickHouse, literal)?;
/// assert_eq!(sql, "3.5E0");
/// ```
pub fn format_literal(
    connector: &str,
    style: LiteralStyle,
    literal: Literal<'_>,
) -> RewriteResult<String> {
    let Some(ty) = literal.canonical_type() else {
        return Err(RewriteError::unsupported_type(connector, literal.type_name));
    };

    match ty {
        t if t.is_integer_family() => Ok(literal.value.to_string()),
        CanonicalType::Real => Ok(literal.value.to_string()),
        CanonicalType::Double => Ok(style.double(parse_double(connector, literal.value)?)),
        t if t.is_character() => Ok(style.quote(literal.value)),
        _ => Err(RewriteError::unsupported_type(connector, literal.type_name)),
    }
}
