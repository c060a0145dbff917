// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for registry construction and dispatch

use dialect_rewrite_function_registry::builtin::clickhouse;
use dialect_rewrite_function_registry::{
    ConflictPolicy, DialectVersion, FunctionCall, FunctionIdentity, RegistryError, RewriteRegistry,
    RewriteRule, RuleSource, UdfRewriteConfig, UdfRule,
};
use dialect_rewrite_test_utils::init_tracing;
use std::sync::Arc;
use std::thread;

fn full_registry(version: DialectVersion) -> RewriteRegistry {
    init_tracing();
    let mut builder = RewriteRegistry::builder("clickhouse", version);
    builder.register_clickhouse_builtins().unwrap();
    builder
        .register_supplier(&clickhouse::default_udf_rules().unwrap())
        .unwrap();
    builder.build()
}

fn render(registry: &RewriteRegistry, name: &str, args: &[&str]) -> String {
    let name = FunctionIdentity::new(name);
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    registry.rewrite(&FunctionCall::new(&name, &args)).unwrap()
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_aggregates_render_as_canonical_names() {
    let registry = full_registry(DialectVersion::default());
    assert_eq!(render(&registry, "SUM", &["x"]), "sum(x)");
    assert_eq!(render(&registry, "avg", &["x"]), "avg(x)");
    assert_eq!(render(&registry, "count", &["*"]), "count(*)");
    assert_eq!(render(&registry, "max", &["x"]), "max(x)");
    assert_eq!(render(&registry, "min", &["x"]), "min(x)");
}

#[test]
fn test_distinct_count() {
    let registry = full_registry(DialectVersion::default());
    let name = FunctionIdentity::new("count");
    let args = vec!["user_id".to_string()];
    let call = FunctionCall::new(&name, &args).with_distinct(true);
    assert_eq!(registry.rewrite(&call).unwrap(), "count(DISTINCT user_id)");
}

#[test]
fn test_custom_transforms() {
    let registry = full_registry(DialectVersion::default());
    assert_eq!(
        render(&registry, "from_base64", &["'aGk='"]),
        "base64Decode('aGk=')"
    );
    assert_eq!(
        render(&registry, "date_parse", &["s", "'%Y-%m-%d'"]),
        "parseDateTimeBestEffort(s)"
    );
}

#[test]
fn test_date_parse_follows_version() {
    let old = full_registry(DialectVersion::new(23, 2, 0));
    let name = FunctionIdentity::new("date_parse");
    let args = vec!["'03/04/2024'".to_string(), "'%m/%d/%Y'".to_string()];
    let err = old.rewrite(&FunctionCall::new(&name, &args)).unwrap_err();
    assert!(err.is_unsupported_feature());

    let new = full_registry(DialectVersion::new(23, 3, 0));
    assert_eq!(
        render(&new, "date_parse", &["'03/04/2024'", "'%m/%d/%Y'"]),
        "parseDateTime('03/04/2024', '%m/%d/%Y')"
    );
}

#[test]
fn test_unsupported_markers_fail_with_connector_and_function() {
    let registry = full_registry(DialectVersion::default());
    for marker in [
        clickhouse::INTERVAL_LITERAL_DAY_TO_SECOND,
        clickhouse::INTERVAL_LITERAL_YEAR_TO_MONTH,
        clickhouse::TIME_WITH_TZ_LITERAL,
    ] {
        let name = FunctionIdentity::new(marker);
        let args = vec!["'1'".to_string()];
        let err = registry.rewrite(&FunctionCall::new(&name, &args)).unwrap_err();
        assert_eq!(err.connector(), "clickhouse");
        assert!(err.feature().unwrap().contains(marker));
    }
}

#[test]
fn test_config_templates_apply() {
    let registry = full_registry(DialectVersion::default());
    assert_eq!(render(&registry, "strpos", &["s", "'a'"]), "position(s, 'a')");
    assert_eq!(render(&registry, "approx_distinct", &["u"]), "uniq(u)");
    assert_eq!(
        render(&registry, "to_unixtime", &["ts"]),
        "toUnixTimestamp64Milli(toDateTime64(ts, 3)) / 1000"
    );
    assert_eq!(registry.source(&FunctionIdentity::new("random")), None);

    let registry = full_registry(DialectVersion::new(22, 11, 0));
    assert_eq!(render(&registry, "random", &[]), "randCanonical()");
}

#[test]
fn test_versioned_rule_selection() {
    let old = full_registry(DialectVersion::new(20, 8, 0));
    assert_eq!(old.source(&FunctionIdentity::new("levenshtein_distance")), None);
    assert_eq!(
        render(&old, "levenshtein_distance", &["a", "b"]),
        "levenshtein_distance(a, b)"
    );

    let new = full_registry(DialectVersion::new(23, 9, 0));
    assert_eq!(
        new.source(&FunctionIdentity::new("levenshtein_distance")),
        Some(RuleSource::Config)
    );
    assert_eq!(
        render(&new, "levenshtein_distance", &["a", "b"]),
        "editDistance(a, b)"
    );
}

#[test]
fn test_rendering_is_idempotent() {
    let registry = full_registry(DialectVersion::default());
    let first = render(&registry, "date_parse", &["s", "'%Y-%m-%d'"]);
    let second = render(&registry, "date_parse", &["s", "'%Y-%m-%d'"]);
    assert_eq!(first, second);
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_config_colliding_with_builtin_is_conflict() {
    let config = UdfRewriteConfig::default().with_rules(
        "clickhouse",
        vec![UdfRule::new("DATE_PARSE", "parseDateTimeBestEffort($1)")],
    );
    let mut builder = RewriteRegistry::builder("clickhouse", DialectVersion::default());
    builder.register_clickhouse_builtins().unwrap();
    let err = builder.register_supplier(&config).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Conflict {
            existing: RuleSource::BuiltIn,
            incoming: RuleSource::Config,
            ..
        }
    ));
}

#[test]
fn test_config_overrides_builtin_when_allowed() {
    let config = UdfRewriteConfig::default().with_rules(
        "clickhouse",
        vec![UdfRule::new("date_parse", "parseDateTimeBestEffortOrNull($1)")],
    );
    let mut builder = RewriteRegistry::builder("clickhouse", DialectVersion::default())
        .conflict_policy(ConflictPolicy::Override);
    builder.register_clickhouse_builtins().unwrap();
    builder.register_supplier(&config).unwrap();
    let registry = builder.build();

    assert_eq!(
        render(&registry, "date_parse", &["s", "'%Y'"]),
        "parseDateTimeBestEffortOrNull(s)"
    );
}

#[test]
fn test_marker_colliding_with_direct_mapping() {
    let mut builder = RewriteRegistry::builder("clickhouse", DialectVersion::default());
    builder
        .register_source(
            RuleSource::BuiltIn,
            [(FunctionIdentity::new("f"), RewriteRule::direct("g"))],
        )
        .unwrap();
    let err = builder
        .register_source(
            RuleSource::UnsupportedMarker,
            [(FunctionIdentity::new("F"), RewriteRule::Unsupported)],
        )
        .unwrap_err();
    assert!(err.is_conflict());
}

#[test]
fn test_registry_shared_across_threads() {
    let registry = Arc::new(full_registry(DialectVersion::default()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let column = format!("c{i}");
                render(&registry, "sum", &[column.as_str()])
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("sum(c{i})"));
    }
}
