// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the ClickHouse query writer

use dialect_rewrite_function_registry::{ConflictPolicy, DialectVersion, UdfRewriteConfig};
use dialect_rewrite_ir::{CurrentTimeFunction, WindowFrameType};
use dialect_rewrite_test_utils::{RewriteAssertions, RuleFixtures, args, init_tracing};
use dialect_rewrite_writer::{
    ClickHouseQueryWriter, ConfigError, ExtractField, FunctionCall, FunctionIdentity,
    RewriteError, Selection, SqlQueryWriter, WriterConfig, WriterError,
};
use std::sync::Arc;
use std::thread;

const CONNECTOR: &str = "clickhouse";

fn writer() -> ClickHouseQueryWriter {
    init_tracing();
    ClickHouseQueryWriter::new(WriterConfig::default()).unwrap()
}

fn writer_at(major: u32, minor: u32) -> ClickHouseQueryWriter {
    init_tracing();
    ClickHouseQueryWriter::new(WriterConfig::new(DialectVersion::new(major, minor, 0))).unwrap()
}

fn call(
    writer: &ClickHouseQueryWriter,
    name: &str,
    arguments: &[&str],
) -> Result<String, RewriteError> {
    let name = FunctionIdentity::new(name);
    let arguments = args(arguments);
    writer.function_call(&FunctionCall::new(&name, &arguments))
}

// =============================================================================
// Comparison
// =============================================================================

#[test]
fn test_supported_comparison_operators() {
    let w = writer();
    for op in ["=", "==", ">", "<", ">=", "<=", "!=", "<>"] {
        assert_eq!(
            w.comparison_expression(op, "a", "b").unwrap(),
            format!("(a {op} b)")
        );
    }
}

#[test]
fn test_unsupported_comparison_operators() {
    let w = writer();
    for op in ["IS DISTINCT FROM", "<=>", "===", ""] {
        RewriteAssertions::assert_unsupported_feature(
            w.comparison_expression(op, "a", "b"),
            CONNECTOR,
            &format!("comparison operator {op}"),
        );
    }
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_generic_literals() {
    let w = writer();
    assert_eq!(w.generic_literal("BIGINT", "9007199254740993").unwrap(), "9007199254740993");
    assert_eq!(w.generic_literal("real", "1.25").unwrap(), "1.25");
    assert_eq!(w.generic_literal("varchar", "abc").unwrap(), "'abc'");
    assert_eq!(w.generic_literal("char(3)", "o'k").unwrap(), "'o\\'k'");

    let double = w.generic_literal("double", "3.5").unwrap();
    assert_eq!(double.parse::<f64>().unwrap(), 3.5);
}

#[test]
fn test_generic_literal_unsupported_types() {
    let w = writer();
    RewriteAssertions::assert_unsupported_type(
        w.generic_literal("unknown_type", "x"),
        "unknown_type",
    );
    RewriteAssertions::assert_unsupported_type(w.generic_literal("timestamp", "x"), "timestamp");
    RewriteAssertions::assert_malformed(w.generic_literal("double", "three"));
}

#[test]
fn test_other_literals() {
    let w = writer();
    assert_eq!(w.string_literal("a\\b"), "'a\\\\b'");
    assert_eq!(w.double_literal(f64::INFINITY), "inf");
    assert_eq!(w.boolean_literal(false), "false");
    assert_eq!(w.null_literal(), "null");
}

// =============================================================================
// Gated constructs
// =============================================================================

#[test]
fn test_like_predicate() {
    let w = writer();
    assert_eq!(w.like_predicate("name", "'a%'", None).unwrap(), "(name LIKE 'a%')");
    RewriteAssertions::assert_unsupported_feature(
        w.like_predicate("name", "'a%'", Some("'\\'")),
        CONNECTOR,
        "LIKE predicate: ESCAPE clause",
    );
}

#[test]
fn test_cast() {
    let w = writer();
    assert_eq!(w.cast("x", "Int64", false).unwrap(), "CAST(x AS Int64)");
    for (expr, ty) in [("x", "Int64"), ("'1'", "String"), ("", "")] {
        RewriteAssertions::assert_unsupported_feature(
            w.cast(expr, ty, true),
            CONNECTOR,
            "try_cast",
        );
    }
}

#[test]
fn test_extract() {
    let w = writer();
    assert_eq!(
        w.extract("ts", ExtractField::Second).unwrap(),
        "EXTRACT(SECOND FROM ts)"
    );
    assert_eq!(w.extract("ts", ExtractField::Year).unwrap(), "EXTRACT(YEAR FROM ts)");
    for field in [ExtractField::Quarter, ExtractField::Week, ExtractField::DayOfWeek] {
        RewriteAssertions::assert_unsupported_feature(
            w.extract("ts", field),
            CONNECTOR,
            &format!("extract field: {field}"),
        );
    }
}

#[test]
fn test_array_constructor() {
    let w = writer();
    assert_eq!(
        w.array_constructor(&args(&["1", "2", "3"])).unwrap(),
        "ARRAY(1, 2, 3)"
    );
    assert_eq!(w.array_constructor(&[]).unwrap(), "ARRAY()");
}

#[test]
fn test_always_unsupported_constructs() {
    let w = writer();
    let list = args(&["a", "b"]);
    let cases: Vec<(Result<String, RewriteError>, &str)> = vec![
        (w.at_time_zone("ts", "'UTC'"), "at time zone"),
        (w.row(&list), "row"),
        (w.current_user(), "current user"),
        (w.current_path(), "current path"),
        (w.current_time(CurrentTimeFunction::Timestamp, Some(3)), "current time"),
        (w.subscript("arr", "1"), "subscript expression"),
        (w.exists("(SELECT 1)"), "exists"),
        (w.dereference("r", "f"), "dereference expression"),
        (w.bind(&list, "f"), "bind expression"),
        (w.try_expression("x"), "try expression"),
        (w.filter("x > 1"), "filter"),
        (w.format_window_column("rank", &list, "(PARTITION BY a)"), "window function"),
        (w.window(&list, Some("a"), None), "window specification"),
        (w.window_frame(WindowFrameType::Rows, "UNBOUNDED PRECEDING", None), "window frame"),
        (w.grouping_operation(&list), "grouping"),
    ];
    for (result, feature) in cases {
        RewriteAssertions::assert_unsupported_feature(result, CONNECTOR, feature);
    }
}

#[test]
fn test_failures_name_connector_and_construct() {
    let w = writer();
    let err = w.at_time_zone("ts", "'UTC'").unwrap_err();
    assert_eq!(err.to_string(), "clickhouse connector does not support at time zone");
}

// =============================================================================
// Aggregation
// =============================================================================

#[test]
fn test_aggregation_with_group_keys() {
    let w = writer();
    let selections = vec![Selection::new("a"), Selection::new("sum(b)").with_alias("total")];
    let sql = w
        .aggregation(&selections, Some(args(&["a"]).as_slice()), None, "T")
        .unwrap();
    assert_eq!(sql, "SELECT a, sum(b) AS total FROM T GROUP BY a");
    assert!(sql.ends_with("FROM T GROUP BY a"));
}

#[test]
fn test_aggregation_multiple_keys() {
    let w = writer();
    let selections = vec![Selection::new("a"), Selection::new("b")];
    assert_eq!(
        w.aggregation(&selections, Some(args(&["a", "b"]).as_slice()), None, "T")
            .unwrap(),
        "SELECT a, b FROM T GROUP BY a, b"
    );
}

#[test]
fn test_aggregation_without_keys() {
    let w = writer();
    let selections = vec![Selection::new("count(*)")];
    assert_eq!(
        w.aggregation(&selections, Some(Vec::new().as_slice()), None, "T").unwrap(),
        "SELECT count(*) FROM T"
    );
    assert_eq!(
        w.aggregation(&selections, None, None, "T").unwrap(),
        "SELECT count(*) FROM T"
    );
}

#[test]
fn test_aggregation_grouping_id_unsupported() {
    let w = writer();
    let selections = vec![Selection::new("a")];
    RewriteAssertions::assert_unsupported_feature(
        w.aggregation(&selections, None, Some("groupid"), "T"),
        CONNECTOR,
        "grouping sets",
    );
}

#[test]
fn test_select_drops_redundant_alias() {
    let w = writer();
    let selections = vec![Selection::new("a").with_alias("a"), Selection::new("b").with_alias("c")];
    assert_eq!(w.select(&selections, "t"), "SELECT a, b AS c FROM t");
}

// =============================================================================
// Function calls
// =============================================================================

#[test]
fn test_builtin_functions() {
    let w = writer();
    assert_eq!(call(&w, "SUM", &["x"]).unwrap(), "sum(x)");
    assert_eq!(call(&w, "from_base64", &["'aGk='"]).unwrap(), "base64Decode('aGk=')");
    assert_eq!(
        call(&w, "date_parse", &["s", "'%Y-%m-%d'"]).unwrap(),
        "parseDateTimeBestEffort(s)"
    );
}

#[test]
fn test_date_parse_keeps_format_from_23_3() {
    let w = writer_at(23, 3);
    let us = call(&w, "date_parse", &["'03/04/2024'", "'%m/%d/%Y'"]).unwrap();
    let eu = call(&w, "date_parse", &["'03/04/2024'", "'%d/%m/%Y'"]).unwrap();
    assert_eq!(us, "parseDateTime('03/04/2024', '%m/%d/%Y')");
    assert_ne!(us, eu);
    assert_eq!(
        call(&w, "date_parse", &["'2024-100'", "'%Y-%j'"]).unwrap(),
        "parseDateTime('2024-100', '%Y-%j')"
    );
}

#[test]
fn test_date_parse_rejects_ambiguous_layouts_before_23_3() {
    let w = writer_at(23, 2);
    for (value, format) in [
        ("'03/04/2024'", "'%m/%d/%Y'"),
        ("'03/04/2024'", "'%d/%m/%Y'"),
        ("'2024-100'", "'%Y-%j'"),
    ] {
        let err = call(&w, "date_parse", &[value, format]).unwrap_err();
        assert!(err.is_unsupported_feature(), "{format}");
        assert_eq!(err.connector(), CONNECTOR);
    }
    assert_eq!(
        call(&w, "date_parse", &["s", "'%Y%m%d'"]).unwrap(),
        "parseDateTimeBestEffort(s)"
    );
}

#[test]
fn test_return_type_preserving_templates() {
    let w = writer();
    assert_eq!(
        call(&w, "to_unixtime", &["ts"]).unwrap(),
        "toUnixTimestamp64Milli(toDateTime64(ts, 3)) / 1000"
    );
    assert_eq!(call(&w, "random", &[]).unwrap(), "random()");
    assert_eq!(call(&writer_at(22, 11), "random", &[]).unwrap(), "randCanonical()");
}

#[test]
fn test_unsupported_marker_functions() {
    let w = writer();
    let err = call(&w, "$literal$interval day to second", &["'1 00:00:00'"]).unwrap_err();
    assert!(err.is_unsupported_feature());
    assert_eq!(err.connector(), CONNECTOR);
    assert!(err.feature().unwrap().contains("$literal$interval day to second"));
}

#[test]
fn test_fallthrough_function() {
    let w = writer();
    assert_eq!(call(&w, "lower", &["name"]).unwrap(), "lower(name)");
    let name = FunctionIdentity::new("groupArray");
    let arguments = args(&["x"]);
    let with_order = FunctionCall::new(&name, &arguments)
        .with_distinct(true)
        .with_order_by(Some("x DESC"));
    assert_eq!(
        w.function_call(&with_order).unwrap(),
        "groupArray(DISTINCT x ORDER BY x DESC)"
    );
}

#[test]
fn test_filter_and_window_fail_on_every_route() {
    let w = writer();
    let arguments = args(&["x"]);
    for name in ["sum", "lower", "strpos", "from_base64"] {
        let name = FunctionIdentity::new(name);
        let filtered = FunctionCall::new(&name, &arguments).with_filter(Some("(WHERE x > 1)"));
        RewriteAssertions::assert_unsupported_feature(
            w.function_call(&filtered),
            CONNECTOR,
            "filter",
        );

        let windowed = FunctionCall::new(&name, &arguments).with_window(Some("(PARTITION BY y)"));
        RewriteAssertions::assert_unsupported_feature(
            w.function_call(&windowed),
            CONNECTOR,
            "window function",
        );
    }
}

#[test]
fn test_config_template_functions() {
    let w = writer();
    assert_eq!(call(&w, "strpos", &["s", "'a'"]).unwrap(), "position(s, 'a')");
    RewriteAssertions::assert_malformed(call(&w, "strpos", &["s"]));
}

#[test]
fn test_version_scoped_functions() {
    assert_eq!(
        call(&writer_at(20, 8), "levenshtein_distance", &["a", "b"]).unwrap(),
        "levenshtein_distance(a, b)"
    );
    assert_eq!(
        call(&writer_at(23, 9), "levenshtein_distance", &["a", "b"]).unwrap(),
        "editDistance(a, b)"
    );
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_inline_rules_collision_rejected_by_default() {
    init_tracing();
    let rules = UdfRewriteConfig::from_yaml(RuleFixtures::builtin_collision_yaml()).unwrap();
    let config = WriterConfig::default().with_udf_rules(rules);
    let err = ClickHouseQueryWriter::new(config).unwrap_err();
    assert!(matches!(err, WriterError::Registry(ref e) if e.is_conflict()));
}

#[test]
fn test_inline_rules_override_when_allowed() {
    init_tracing();
    let config = WriterConfig::from_yaml(RuleFixtures::override_writer_config_yaml()).unwrap();
    assert_eq!(config.conflict_policy, ConflictPolicy::Override);
    let w = ClickHouseQueryWriter::new(config).unwrap();
    assert_eq!(
        call(&w, "date_parse", &["s", "'%Y'"]).unwrap(),
        "parseDateTimeBestEffortOrNull(s)"
    );
    assert_eq!(call(&w, "levenshtein_distance", &["a", "b"]).unwrap(), "editDistance(a, b)");
    // Inline rules replace the shipped set.
    assert_eq!(call(&w, "strpos", &["s", "'a'"]).unwrap(), "strpos(s, 'a')");
}

#[test]
fn test_with_supplier() {
    init_tracing();
    let rules = UdfRewriteConfig::from_json(RuleFixtures::versioned_rules_json()).unwrap();
    let w = ClickHouseQueryWriter::with_supplier(WriterConfig::default(), &rules).unwrap();
    assert!(!w.registry().contains(&FunctionIdentity::new("random")));
    assert!(!w.registry().contains(&FunctionIdentity::new("to_base64")));

    let config = WriterConfig::new(DialectVersion::new(22, 11, 0));
    let w = ClickHouseQueryWriter::with_supplier(config, &rules).unwrap();
    assert_eq!(call(&w, "random", &[]).unwrap(), "randCanonical()");
    assert_eq!(call(&w, "strpos", &["s", "'a'"]).unwrap(), "position(s, 'a')");
}

#[test]
fn test_invalid_config_rejected() {
    let config = WriterConfig {
        connector: String::new(),
        ..Default::default()
    };
    let err = ClickHouseQueryWriter::new(config).unwrap_err();
    assert!(matches!(err, WriterError::Config(ConfigError::EmptyConnector)));
}

#[test]
fn test_invalid_template_rejected() {
    let rules = UdfRewriteConfig::from_yaml(RuleFixtures::invalid_template_yaml()).unwrap();
    assert!(ClickHouseQueryWriter::new(WriterConfig::default().with_udf_rules(rules)).is_err());
}

// =============================================================================
// Idempotence and sharing
// =============================================================================

#[test]
fn test_rendering_is_idempotent() {
    let w = writer();
    let selections = vec![Selection::new("a")];
    let keys = args(&["a"]);
    assert_eq!(
        w.aggregation(&selections, Some(keys.as_slice()), None, "T").unwrap(),
        w.aggregation(&selections, Some(keys.as_slice()), None, "T").unwrap()
    );
    assert_eq!(
        w.generic_literal("double", "0.1").unwrap(),
        w.generic_literal("double", "0.1").unwrap()
    );
    assert_eq!(
        call(&w, "date_parse", &["s", "'%Y-%m-%d'"]).unwrap(),
        call(&w, "date_parse", &["s", "'%Y-%m-%d'"]).unwrap()
    );
}

#[test]
fn test_writer_shared_across_threads() {
    let w = Arc::new(writer());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let w = Arc::clone(&w);
            thread::spawn(move || {
                let column = format!("c{i}");
                w.comparison_expression("==", &column, "1").unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("(c{i} == 1)"));
    }
}

#[test]
fn test_writer_usable_as_trait_object() {
    let w: Box<dyn SqlQueryWriter> = Box::new(writer());
    assert_eq!(w.connector(), CONNECTOR);
    assert_eq!(w.cast("x", "String", false).unwrap(), "CAST(x AS String)");
}
