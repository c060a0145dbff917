// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Assertions on typed render failures

use dialect_rewrite_function_registry::{RegistryError, RegistryResult};
use dialect_rewrite_ir::{RewriteError, RewriteResult};

/// Custom assertion helpers for rewrite testing
pub struct RewriteAssertions;

impl RewriteAssertions {
    /// Assert that rendering failed with an unsupported feature named `feature`
    pub fn assert_unsupported_feature<T: std::fmt::Debug>(
        result: RewriteResult<T>,
        connector: &str,
        feature: &str,
    ) {
        match result {
            Err(RewriteError::UnsupportedFeature {
                connector: c,
                feature: f,
            }) => {
                assert_eq!(c, connector, "Connector mismatch");
                assert_eq!(f, feature, "Feature mismatch");
            }
            other => panic!("Expected UnsupportedFeature '{}', found {:?}", feature, other),
        }
    }

    /// Assert that rendering failed because `type_name` has no literal form
    pub fn assert_unsupported_type<T: std::fmt::Debug>(result: RewriteResult<T>, type_name: &str) {
        match result {
            Err(RewriteError::UnsupportedType { type_name: t, .. }) => {
                assert_eq!(t, type_name, "Type name mismatch");
            }
            other => panic!("Expected UnsupportedType '{}', found {:?}", type_name, other),
        }
    }

    /// Assert that rendering failed as a malformed request
    pub fn assert_malformed<T: std::fmt::Debug>(result: RewriteResult<T>) {
        match result {
            Err(RewriteError::MalformedRequest { .. }) => {}
            other => panic!("Expected MalformedRequest, found {:?}", other),
        }
    }

    /// Assert that registry construction failed with a conflict on `function`
    pub fn assert_conflict<T: std::fmt::Debug>(result: RegistryResult<T>, function: &str) {
        match result {
            Err(RegistryError::Conflict { function: f, .. }) => {
                assert!(
                    f.eq_ignore_ascii_case(function),
                    "Expected conflict on '{}', found '{}'",
                    function,
                    f
                );
            }
            other => panic!("Expected Conflict on '{}', found {:?}", function, other),
        }
    }
}
