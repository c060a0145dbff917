// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Function calls
//!
//! [`FunctionIdentity`] is the registry lookup key: a dot-qualified name whose
//! parts compare case-insensitively. The original spelling is kept for
//! rendering. [`FunctionCall`] bundles everything a rewrite strategy needs to
//! know about a single call site.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Qualified function name used as the registry key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FunctionIdentity {
    display: String,
    key: String,
}

impl FunctionIdentity {
    /// Create an identity from its (possibly dot-qualified) name
    pub fn new(name: impl Into<String>) -> Self {
        let display: String = name.into();
        let key = display
            .split('.')
            .map(|part| part.trim().to_lowercase())
            .collect::<Vec<_>>()
            .join(".");
        Self { display, key }
    }

    /// Create an identity from its namespace parts
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = parts
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(".");
        Self::new(joined)
    }

    /// Normalized lookup key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Name as supplied by the caller
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Unqualified function name (last namespace part)
    pub fn suffix(&self) -> &str {
        self.display.rsplit('.').next().unwrap_or(&self.display)
    }
}

impl PartialEq for FunctionIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FunctionIdentity {}

impl Hash for FunctionIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for FunctionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl From<&str> for FunctionIdentity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FunctionIdentity {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<FunctionIdentity> for String {
    fn from(value: FunctionIdentity) -> Self {
        value.display
    }
}

/// A function call site with its arguments already rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionCall<'a> {
    pub name: &'a FunctionIdentity,
    pub distinct: bool,
    pub arguments: &'a [String],
    /// Rendered sort keys of an ordered aggregate, without the `ORDER BY` keyword
    pub order_by: Option<&'a str>,
    /// Rendered FILTER clause, e.g. `(WHERE x > 1)`
    pub filter: Option<&'a str>,
    /// Rendered window specification, e.g. `(PARTITION BY a)`
    pub window: Option<&'a str>,
}

impl<'a> FunctionCall<'a> {
    pub fn new(name: &'a FunctionIdentity, arguments: &'a [String]) -> Self {
        Self {
            name,
            distinct: false,
            arguments,
            order_by: None,
            filter: None,
            window: None,
        }
    }

    pub fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn with_order_by(mut self, order_by: Option<&'a str>) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn with_filter(mut self, filter: Option<&'a str>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_window(mut self, window: Option<&'a str>) -> Self {
        self.window = window;
        self
    }

    /// Whether any clause beyond the plain argument list is attached
    pub fn has_clauses(&self) -> bool {
        self.distinct || self.order_by.is_some() || self.filter.is_some() || self.window.is_some()
    }

    /// Engine-default rendering under the given function name
    ///
    /// `name(DISTINCT a, b ORDER BY o) FILTER (WHERE f) OVER (w)`, each optional
    /// part emitted only when present.
    pub fn render_as(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 16);
        out.push_str(name);
        out.push('(');
        if self.distinct {
            out.push_str("DISTINCT ");
        }
        out.push_str(&self.arguments.join(", "));
        if let Some(order_by) = self.order_by {
            out.push_str(" ORDER BY ");
            out.push_str(order_by);
        }
        out.push(')');
        if let Some(filter) = self.filter {
            out.push_str(" FILTER ");
            out.push_str(filter);
        }
        if let Some(window) = self.window {
            out.push_str(" OVER ");
            out.push_str(window);
        }
        out
    }

    /// Engine-default rendering under the call's own name
    pub fn render_default(&self) -> String {
        self.render_as(self.name.as_str())
    }
}
