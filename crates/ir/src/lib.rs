// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dialect Rewrite - Intermediate Representation
//!
//! This crate provides the engine-neutral vocabulary shared by the function
//! rewrite registry and the dialect writers:
//! - Target dialects, negotiated versions and gated SQL features
//! - Canonical scalar types and typed literals
//! - Node metadata for linearized expression calls
//! - Function identities and call packages
//! - The render-time error taxonomy

pub mod dialect;
pub mod error;
pub mod expr;
pub mod function;
pub mod types;

// Re-export commonly used types
pub use dialect::{Dialect, DialectVersion, ParseVersionError, SqlFeature};
pub use error::{RewriteError, RewriteResult};
pub use expr::{
    ArithmeticOperator, ArithmeticSign, CurrentTimeFunction, ExtractField, LogicalOperator,
    Selection, WindowFrameType,
};
pub use function::{FunctionCall, FunctionIdentity};
pub use types::{CanonicalType, Literal};
