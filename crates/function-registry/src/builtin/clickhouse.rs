// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! ClickHouse builtin rewrite rules

use crate::{CustomRewrite, DateParseStrategy, RegistryResult, RewriteRule, UdfRewriteConfig};
use dialect_rewrite_ir::{
    DialectVersion, FunctionCall, FunctionIdentity, RewriteError, RewriteResult,
};

pub const AGGR_FUNC_SUM: &str = "sum";
pub const AGGR_FUNC_AVG: &str = "avg";
pub const AGGR_FUNC_COUNT: &str = "count";
pub const AGGR_FUNC_MAX: &str = "max";
pub const AGGR_FUNC_MIN: &str = "min";

pub const FUNC_FROM_BASE64: &str = "from_base64";
pub const FUNC_DATE_PARSE: &str = "date_parse";

/// Engine-internal literal functions ClickHouse cannot express
pub const INTERVAL_LITERAL_DAY_TO_SECOND: &str = "$literal$interval day to second";
pub const INTERVAL_LITERAL_YEAR_TO_MONTH: &str = "$literal$interval year to month";
pub const TIME_WITH_TZ_LITERAL: &str = "$literal$time with time zone";

const DEFAULT_UDF_RULES: &str = include_str!("clickhouse_udf.yaml");

/// First version whose `parseDateTime` reads MySQL-style format strings
pub const PARSE_DATE_TIME_MIN_VERSION: DialectVersion = DialectVersion::new(23, 3, 0);

/// MySQL-style specifiers `parseDateTime` honors
const PARSE_DATE_TIME_SPECIFIERS: &[char] = &[
    'Y', 'y', 'm', 'd', 'e', 'H', 'h', 'I', 'i', 's', 'S', 'p', 'j', 'a', 'b', 'T', 'r',
];

/// Year-first layouts `parseDateTimeBestEffort` reads without ambiguity
const BEST_EFFORT_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%m-%d %H:%i:%s",
    "%Y-%m-%d %H:%i:%s.%f",
    "%Y%m%d",
];

/// Direct aggregate mappings and dialect-specific transforms for `version`
pub fn builtin_rules(version: DialectVersion) -> Vec<(FunctionIdentity, RewriteRule)> {
    let mut rules: Vec<(FunctionIdentity, RewriteRule)> = [
        AGGR_FUNC_SUM,
        AGGR_FUNC_AVG,
        AGGR_FUNC_COUNT,
        AGGR_FUNC_MAX,
        AGGR_FUNC_MIN,
    ]
    .into_iter()
    .map(|name| (FunctionIdentity::new(name), RewriteRule::direct(name)))
    .collect();

    rules.push((
        FunctionIdentity::new(FUNC_FROM_BASE64),
        RewriteRule::Custom(CustomRewrite::FromBase64),
    ));
    let date_parse = CustomRewrite::DateParse(DateParseStrategy::for_version(version));
    rules.push((
        FunctionIdentity::new(FUNC_DATE_PARSE),
        RewriteRule::Custom(date_parse),
    ));
    rules
}

/// Functions permanently unsupported regardless of version
pub fn unsupported_markers() -> Vec<(FunctionIdentity, RewriteRule)> {
    [
        INTERVAL_LITERAL_DAY_TO_SECOND,
        INTERVAL_LITERAL_YEAR_TO_MONTH,
        TIME_WITH_TZ_LITERAL,
    ]
    .into_iter()
    .map(|name| (FunctionIdentity::new(name), RewriteRule::Unsupported))
    .collect()
}

/// Versioned UDF rewrite patterns shipped with the connector
pub fn default_udf_rules() -> RegistryResult<UdfRewriteConfig> {
    UdfRewriteConfig::from_yaml(DEFAULT_UDF_RULES)
}

fn reject_clauses(connector: &str, call: &FunctionCall<'_>) -> RewriteResult<()> {
    if call.has_clauses() {
        return Err(RewriteError::unsupported_named(
            connector,
            format!("clauses on function {}", call.name),
        ));
    }
    Ok(())
}

fn expect_arity(connector: &str, call: &FunctionCall<'_>, arity: usize) -> RewriteResult<()> {
    if call.arguments.len() != arity {
        return Err(RewriteError::malformed(
            connector,
            format!(
                "function {} expects {arity} argument(s), got {}",
                call.name,
                call.arguments.len()
            ),
        ));
    }
    Ok(())
}

/// `from_base64(x)` -> `base64Decode(x)`
pub(crate) fn rewrite_from_base64(
    connector: &str,
    call: &FunctionCall<'_>,
) -> RewriteResult<String> {
    reject_clauses(connector, call)?;
    expect_arity(connector, call, 1)?;
    Ok(format!("base64Decode({})", call.arguments[0]))
}

/// `date_parse(value, format)` -> `parseDateTime(value, format)`, or
/// `parseDateTimeBestEffort(value)` on versions without `parseDateTime`
///
/// The format must be a string literal. Layouts the chosen function cannot
/// read exactly are rejected rather than approximated.
pub(crate) fn rewrite_date_parse(
    connector: &str,
    strategy: DateParseStrategy,
    call: &FunctionCall<'_>,
) -> RewriteResult<String> {
    reject_clauses(connector, call)?;
    expect_arity(connector, call, 2)?;

    let value = &call.arguments[0];
    let format = call.arguments[1].trim();

    let pattern = format
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .ok_or_else(|| {
            RewriteError::unsupported_named(
                connector,
                format!("date_parse with non-literal format {format}"),
            )
        })?;

    match strategy {
        DateParseStrategy::Format => {
            check_specifiers(connector, pattern)?;
            Ok(format!("parseDateTime({value}, {format})"))
        }
        DateParseStrategy::BestEffort => {
            if !BEST_EFFORT_LAYOUTS.contains(&pattern) {
                return Err(RewriteError::unsupported_named(
                    connector,
                    format!(
                        "date_parse format {format} before version {PARSE_DATE_TIME_MIN_VERSION}"
                    ),
                ));
            }
            Ok(format!("parseDateTimeBestEffort({value})"))
        }
    }
}

fn check_specifiers(connector: &str, pattern: &str) -> RewriteResult<()> {
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        match chars.next() {
            Some('%') => {}
            Some(spec) if PARSE_DATE_TIME_SPECIFIERS.contains(&spec) => {}
            Some(spec) => {
                return Err(RewriteError::unsupported_named(
                    connector,
                    format!("date_parse format specifier %{spec}"),
                ));
            }
            None => {
                return Err(RewriteError::unsupported_named(
                    connector,
                    "date_parse format ending in '%'",
                ));
            }
        }
    }
    Ok(())
}
