// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dialect Rewrite - Query Writers
//!
//! This crate renders engine-neutral expression nodes as SQL text for one
//! target dialect.
//!
//! ## Overview
//!
//! A writer is responsible for:
//! - Gating every construct against a declarative capability table
//! - Formatting typed literals with the dialect's lexical rules
//! - Combining already-rendered child text into one node's SQL
//! - Routing function calls through the immutable rewrite registry
//!
//! ## Rendering Process
//!
//! ```text
//! Planner walks tree bottom-up → one writer call per node → SQL fragment
//! ```
//!
//! Every failure is terminal for the enclosing query and names the connector
//! and the construct, function or type that could not be rendered.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dialect_rewrite_writer::{ClickHouseQueryWriter, SqlQueryWriter, WriterConfig};
//!
//! let writer = ClickHouseQueryWriter::new(WriterConfig::default())?;
//!
//! let predicate = writer.comparison_expression(">=", "price", "10")?;
//! let literal = writer.generic_literal("double", "3.5")?;
//! assert_eq!(predicate, "(price >= 10)");
//! assert_eq!(literal, "3.5E0");
//! ```

pub mod capability;
pub mod config;
pub mod dialect;
pub mod error;
pub mod literal;
pub mod writer;

pub use capability::{CapabilityTable, STANDARD_COMPARISON_OPERATORS};
pub use config::WriterConfig;
pub use error::{ConfigError, WriterError, WriterResult};
pub use literal::{LiteralStyle, format_literal};
pub use writer::{BaseQueryWriter, SqlQueryWriter};

#[cfg(feature = "clickhouse")]
pub use dialect::{CLICKHOUSE_CAPABILITIES, ClickHouseQueryWriter};

// Re-exports from ir for convenience
pub use dialect_rewrite_ir::{
    ExtractField, FunctionCall, FunctionIdentity, RewriteError, RewriteResult, Selection,
    SqlFeature,
};
