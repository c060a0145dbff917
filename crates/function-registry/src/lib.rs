// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Function Rewrite Registry
//!
//! This crate maps canonical function identities to dialect rewrite
//! strategies. A registry is assembled once from ordered sources and is
//! immutable afterwards.
//!
//! ## Sources
//!
//! 1. Built-in rules: direct aggregate mappings and dialect-specific transforms
//! 2. Unsupported markers: functions the dialect can never render
//! 3. Versioned configuration: `$n` templates selected by dialect version
//!
//! Duplicate identities across sources fail construction unless the
//! [`ConflictPolicy::Override`] policy is chosen.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dialect_rewrite_function_registry::{RewriteRegistry, builtin};
//!
//! let mut builder = RewriteRegistry::builder("clickhouse", version);
//! builder.register_clickhouse_builtins()?;
//! builder.register_supplier(&builtin::clickhouse::default_udf_rules()?)?;
//! let registry = builder.build();
//!
//! let sql = registry.rewrite(&FunctionCall::new(&name, &args))?;
//! ```

pub mod builtin;
pub mod config;
pub mod error;
pub mod registry;
pub mod rule;
pub mod template;

// Re-exports from ir for convenience
pub use dialect_rewrite_ir::{DialectVersion, FunctionCall, FunctionIdentity};

pub use config::{ConnectorRules, RewriteConfigSupplier, UdfRewriteConfig, UdfRule};
pub use error::{RegistryError, RegistryResult};
pub use registry::{ConflictPolicy, RegistryBuilder, RewriteRegistry};
pub use rule::{CustomRewrite, DateParseStrategy, RewriteRule, RuleSource};
pub use template::RewriteTemplate;
