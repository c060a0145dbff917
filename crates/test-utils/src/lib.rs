// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for the dialect rewrite engine
//!
//! This crate provides common testing components including:
//! - Opt-in tracing output for tests
//! - Sample rewrite rule sets and writer configurations
//! - Assertions on typed render failures

pub mod assertions;
pub mod fixtures;
pub mod logging;

// Re-exports for convenience
pub use assertions::RewriteAssertions;
pub use fixtures::{RuleFixtures, args};
pub use logging::init_tracing;
