// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Textual rewrite templates
//!
//! A template is target-dialect SQL with positional placeholders: `$1` is the
//! first rendered argument, `$2` the second, and so on. `$$` produces a
//! literal dollar sign.
//!
//! ```text
//! levenshtein_distance(a, b)  --  "editDistance($1, $2)"  -->  editDistance(a, b)
//! ```

use crate::{RegistryError, RegistryResult};
use dialect_rewrite_ir::{FunctionCall, RewriteError, RewriteResult};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Arg(usize),
}

/// A parsed, validated rewrite template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteTemplate {
    source: String,
    segments: Vec<Segment>,
    arity: Option<usize>,
}

impl RewriteTemplate {
    /// Parse a template for the given function
    ///
    /// `arity`, when set, is the exact number of arguments a call must carry.
    pub fn parse(function: &str, source: &str, arity: Option<usize>) -> RegistryResult<Self> {
        let invalid = |reason: String| RegistryError::InvalidTemplate {
            function: function.to_string(),
            reason,
        };

        if source.trim().is_empty() {
            return Err(invalid("template is empty".to_string()));
        }

        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' {
                text.push(c);
                continue;
            }

            match chars.peek() {
                Some('$') => {
                    chars.next();
                    text.push('$');
                }
                Some(d) if d.is_ascii_digit() => {
                    let mut digits = String::new();
                    while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                        digits.push(d);
                        chars.next();
                    }
                    let index: usize = digits
                        .parse()
                        .map_err(|_| invalid(format!("placeholder ${digits} is out of range")))?;
                    if index == 0 {
                        return Err(invalid("placeholders start at $1".to_string()));
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Arg(index));
                }
                _ => return Err(invalid("dangling '$' without a placeholder index".to_string())),
            }
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        let template = Self {
            source: source.to_string(),
            segments,
            arity,
        };

        if let (Some(arity), Some(highest)) = (arity, template.highest_placeholder()) {
            if highest > arity {
                return Err(invalid(format!(
                    "placeholder ${highest} exceeds declared arity {arity}"
                )));
            }
        }

        Ok(template)
    }

    /// Template text as configured
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Exact argument count, if declared
    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    /// Highest placeholder index referenced
    pub fn highest_placeholder(&self) -> Option<usize> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Arg(i) => Some(*i),
                Segment::Text(_) => None,
            })
            .max()
    }

    /// Substitute the call's rendered arguments into the template
    pub fn apply(&self, connector: &str, call: &FunctionCall<'_>) -> RewriteResult<String> {
        let name = call.name.as_str();

        if call.window.is_some() {
            return Err(RewriteError::unsupported_named(
                connector,
                format!("window clause on function {name}"),
            ));
        }
        if call.filter.is_some() {
            return Err(RewriteError::unsupported_named(
                connector,
                format!("filter clause on function {name}"),
            ));
        }
        if call.distinct || call.order_by.is_some() {
            return Err(RewriteError::unsupported_named(
                connector,
                format!("DISTINCT or ORDER BY on function {name}"),
            ));
        }

        let args = call.arguments;
        if let Some(arity) = self.arity {
            if args.len() != arity {
                return Err(RewriteError::malformed(
                    connector,
                    format!(
                        "function {name} expects {arity} argument(s), got {}",
                        args.len()
                    ),
                ));
            }
        }

        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Arg(index) => {
                    let arg = args.get(index - 1).ok_or_else(|| {
                        RewriteError::malformed(
                            connector,
                            format!(
                                "function {name} rewrite references ${index}, but only {} argument(s) were supplied",
                                args.len()
                            ),
                        )
                    })?;
                    out.push_str(arg);
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Display for RewriteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
