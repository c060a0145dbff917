// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Dialect Support
//!
//! This module defines the target dialects, their negotiated versions and the
//! SQL features a dialect may or may not be able to render.
//!
//! ## Design
//!
//! A writer is built for exactly one `(Dialect, DialectVersion)` pair. The
//! version is resolved once when the writer is constructed and is used to
//! select versioned function rewrite rules; it never changes afterwards.
//!
//! ## Features
//!
//! [`SqlFeature`] names every construct the capability gate can reject. The
//! human-readable [`SqlFeature::name`] is what ends up in diagnostics, e.g.
//! `clickhouse does not support at time zone`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Supported target dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Dialect {
    /// ClickHouse column store
    ClickHouse,
}

impl Dialect {
    /// Connector identity used in diagnostics and rule configuration
    pub fn connector_name(&self) -> &'static str {
        match self {
            Dialect::ClickHouse => "clickhouse",
        }
    }

    /// Resolve a dialect from a connector identity (case-insensitive)
    pub fn from_connector_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("clickhouse") {
            Some(Dialect::ClickHouse)
        } else {
            None
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.connector_name())
    }
}

/// Negotiated dialect version (`major.minor[.patch]`)
///
/// Ordering is numeric per component, so `21.10` sorts after `21.3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DialectVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl DialectVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for DialectVersion {
    fn default() -> Self {
        Self::new(20, 8, 0)
    }
}

impl PartialOrd for DialectVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DialectVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl fmt::Display for DialectVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Error returned when a version string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid dialect version '{input}': expected major.minor[.patch]")]
pub struct ParseVersionError {
    pub input: String,
}

impl FromStr for DialectVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseVersionError {
            input: s.to_string(),
        };

        let parts: Vec<&str> = s.trim().split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(err());
        }

        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| err())?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl TryFrom<String> for DialectVersion {
    type Error = ParseVersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DialectVersion> for String {
    fn from(value: DialectVersion) -> Self {
        value.to_string()
    }
}

/// SQL constructs subject to the capability gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SqlFeature {
    Comparison,
    Like,
    LikeEscape,
    Cast,
    TryCast,
    Extract,
    ArrayConstructor,
    Aggregation,
    GroupingSets,
    FunctionCall,
    AtTimeZone,
    RowConstructor,
    CurrentUser,
    CurrentPath,
    CurrentTime,
    Subscript,
    Exists,
    Dereference,
    Bind,
    Try,
    Filter,
    WindowFunction,
    WindowSpecification,
    WindowFrame,
    Grouping,
}

impl SqlFeature {
    /// Every feature, in declaration order
    pub const ALL: [SqlFeature; 25] = [
        SqlFeature::Comparison,
        SqlFeature::Like,
        SqlFeature::LikeEscape,
        SqlFeature::Cast,
        SqlFeature::TryCast,
        SqlFeature::Extract,
        SqlFeature::ArrayConstructor,
        SqlFeature::Aggregation,
        SqlFeature::GroupingSets,
        SqlFeature::FunctionCall,
        SqlFeature::AtTimeZone,
        SqlFeature::RowConstructor,
        SqlFeature::CurrentUser,
        SqlFeature::CurrentPath,
        SqlFeature::CurrentTime,
        SqlFeature::Subscript,
        SqlFeature::Exists,
        SqlFeature::Dereference,
        SqlFeature::Bind,
        SqlFeature::Try,
        SqlFeature::Filter,
        SqlFeature::WindowFunction,
        SqlFeature::WindowSpecification,
        SqlFeature::WindowFrame,
        SqlFeature::Grouping,
    ];

    /// Human-readable construct name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            SqlFeature::Comparison => "comparison",
            SqlFeature::Like => "like predicate",
            SqlFeature::LikeEscape => "LIKE predicate: ESCAPE clause",
            SqlFeature::Cast => "cast",
            SqlFeature::TryCast => "try_cast",
            SqlFeature::Extract => "extract",
            SqlFeature::ArrayConstructor => "array constructor",
            SqlFeature::Aggregation => "aggregation",
            SqlFeature::GroupingSets => "grouping sets",
            SqlFeature::FunctionCall => "function call",
            SqlFeature::AtTimeZone => "at time zone",
            SqlFeature::RowConstructor => "row",
            SqlFeature::CurrentUser => "current user",
            SqlFeature::CurrentPath => "current path",
            SqlFeature::CurrentTime => "current time",
            SqlFeature::Subscript => "subscript expression",
            SqlFeature::Exists => "exists",
            SqlFeature::Dereference => "dereference expression",
            SqlFeature::Bind => "bind expression",
            SqlFeature::Try => "try expression",
            SqlFeature::Filter => "filter",
            SqlFeature::WindowFunction => "window function",
            SqlFeature::WindowSpecification => "window specification",
            SqlFeature::WindowFrame => "window frame",
            SqlFeature::Grouping => "grouping",
        }
    }
}

impl fmt::Display for SqlFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
