// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Sample rewrite rule sets and writer configurations

/// Rendered argument texts from string slices
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Sample UDF rule configurations
pub struct RuleFixtures;

impl RuleFixtures {
    // ===== UDF rule sets =====

    /// Rules whose selection depends on the dialect version
    pub const fn versioned_rules_yaml() -> &'static str {
        r#"
connectors:
  - connector: clickhouse
    rules:
      - function: levenshtein_distance
        template: "editDistance($1, $2)"
        minVersion: "23.9"
        arity: 2
      - function: array_join
        template: "arrayStringConcat($1, $2)"
        maxVersion: "21.1"
      - function: json_extract_scalar
        template: "JSONExtractString($1, $2)"
        minVersion: "20.1"
        maxVersion: "24.1"
"#
    }

    /// The same kind of rule set in JSON
    pub const fn versioned_rules_json() -> &'static str {
        r#"{
  "connectors": [
    {
      "connector": "clickhouse",
      "rules": [
        { "function": "strpos", "template": "position($1, $2)", "arity": 2 },
        { "function": "random", "template": "randCanonical()", "minVersion": "22.11", "arity": 0 }
      ]
    }
  ]
}"#
    }

    /// A rule claiming an identity the built-ins already own
    pub const fn builtin_collision_yaml() -> &'static str {
        r#"
connectors:
  - connector: clickhouse
    rules:
      - function: date_parse
        template: "parseDateTimeBestEffortOrNull($1)"
        arity: 2
"#
    }

    /// A rule set listing the same function twice
    pub const fn duplicate_rules_yaml() -> &'static str {
        r#"
connectors:
  - connector: clickhouse
    rules:
      - function: strpos
        template: "position($1, $2)"
      - function: STRPOS
        template: "locate($1, $2)"
"#
    }

    /// A rule whose template is rejected at construction
    pub const fn invalid_template_yaml() -> &'static str {
        r#"
connectors:
  - connector: clickhouse
    rules:
      - function: broken
        template: "broken($0)"
"#
    }

    // ===== Writer configurations =====

    /// Writer configuration overriding built-ins with inline rules
    pub const fn override_writer_config_yaml() -> &'static str {
        r#"
connector: clickhouse
version: "23.9"
conflictPolicy: override
udfRules:
  connectors:
    - connector: clickhouse
      rules:
        - function: date_parse
          template: "parseDateTimeBestEffortOrNull($1)"
          arity: 2
        - function: levenshtein_distance
          template: "editDistance($1, $2)"
          minVersion: "23.9"
"#
    }
}
