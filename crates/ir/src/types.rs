// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Canonical types
//!
//! Engine-neutral scalar type names as they arrive from the planner. Names are
//! matched case-insensitively and parameterized spellings such as
//! `varchar(10)` or `decimal(10, 2)` resolve to their base type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Engine-neutral scalar type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum CanonicalType {
    // Integer family
    TinyInt,
    SmallInt,
    Integer,
    BigInt,

    // Floating point
    Real,
    Double,
    Decimal,

    // Character
    Varchar,
    Char,

    // Other scalars
    Boolean,
    Date,
    Time,
    Timestamp,
    VarBinary,
    Json,
}

impl CanonicalType {
    /// Resolve a canonical type from its name (case-insensitive)
    ///
    /// Returns `None` for names outside the canonical vocabulary.
    pub fn from_name(name: &str) -> Option<Self> {
        let base = match name.find('(') {
            Some(idx) => &name[..idx],
            None => name,
        };
        let base = base.trim().to_ascii_lowercase();

        let ty = match base.as_str() {
            "tinyint" => CanonicalType::TinyInt,
            "smallint" => CanonicalType::SmallInt,
            "integer" => CanonicalType::Integer,
            "bigint" => CanonicalType::BigInt,
            "real" => CanonicalType::Real,
            "double" => CanonicalType::Double,
            "decimal" => CanonicalType::Decimal,
            "varchar" => CanonicalType::Varchar,
            "char" => CanonicalType::Char,
            "boolean" => CanonicalType::Boolean,
            "date" => CanonicalType::Date,
            "time" => CanonicalType::Time,
            "timestamp" => CanonicalType::Timestamp,
            "varbinary" => CanonicalType::VarBinary,
            "json" => CanonicalType::Json,
            _ => return None,
        };
        Some(ty)
    }

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            CanonicalType::TinyInt => "tinyint",
            CanonicalType::SmallInt => "smallint",
            CanonicalType::Integer => "integer",
            CanonicalType::BigInt => "bigint",
            CanonicalType::Real => "real",
            CanonicalType::Double => "double",
            CanonicalType::Decimal => "decimal",
            CanonicalType::Varchar => "varchar",
            CanonicalType::Char => "char",
            CanonicalType::Boolean => "boolean",
            CanonicalType::Date => "date",
            CanonicalType::Time => "time",
            CanonicalType::Timestamp => "timestamp",
            CanonicalType::VarBinary => "varbinary",
            CanonicalType::Json => "json",
        }
    }

    /// 8/16/32/64-bit signed integers
    pub fn is_integer_family(&self) -> bool {
        matches!(
            self,
            CanonicalType::TinyInt
                | CanonicalType::SmallInt
                | CanonicalType::Integer
                | CanonicalType::BigInt
        )
    }

    /// Fixed or variable-length character types
    pub fn is_character(&self) -> bool {
        matches!(self, CanonicalType::Varchar | CanonicalType::Char)
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed literal awaiting rendering
///
/// The type is kept as the name the planner supplied so that diagnostics can
/// echo it back verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal<'a> {
    pub type_name: &'a str,
    pub value: &'a str,
}

impl<'a> Literal<'a> {
    pub fn new(type_name: &'a str, value: &'a str) -> Self {
        Self { type_name, value }
    }

    /// Canonical type, if the name is part of the vocabulary
    pub fn canonical_type(&self) -> Option<CanonicalType> {
        CanonicalType::from_name(self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(CanonicalType::from_name("BIGINT"), Some(CanonicalType::BigInt));
        assert_eq!(CanonicalType::from_name("Double"), Some(CanonicalType::Double));
        assert_eq!(CanonicalType::from_name("varchar"), Some(CanonicalType::Varchar));
    }

    #[test]
    fn test_from_name_parameterized() {
        assert_eq!(
            CanonicalType::from_name("varchar(10)"),
            Some(CanonicalType::Varchar)
        );
        assert_eq!(
            CanonicalType::from_name("decimal(10, 2)"),
            Some(CanonicalType::Decimal)
        );
    }

    #[test]
    fn test_from_name_unknown() {
        assert_eq!(CanonicalType::from_name("unknown_type"), None);
        assert_eq!(CanonicalType::from_name(""), None);
    }

    #[test]
    fn test_families() {
        assert!(CanonicalType::TinyInt.is_integer_family());
        assert!(!CanonicalType::Real.is_integer_family());
        assert!(CanonicalType::Char.is_character());
        assert!(!CanonicalType::Json.is_character());
    }

    #[test]
    fn test_literal_canonical_type() {
        let lit = Literal::new("Integer", "42");
        assert_eq!(lit.canonical_type(), Some(CanonicalType::Integer));
        assert_eq!(Literal::new("ipaddress", "x").canonical_type(), None);
    }
}
