// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expression node metadata
//!
//! The planner linearizes the expression tree and hands the writer one node at
//! a time, with every child already rendered to text. The types here carry the
//! node-specific metadata that accompanies those calls: operators, EXTRACT
//! fields, window frame kinds and output selections.
//!
//! ## Example
//!
//! For `price * 2 > 10` the writer receives, bottom-up:
//!
//! ```text
//! arithmetic_binary(Multiply, "price", "2")   -> "(price * 2)"
//! comparison_expression(">", "(price * 2)", "10") -> "((price * 2) > 10)"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
}

impl ArithmeticOperator {
    pub fn token(&self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Subtract => "-",
            ArithmeticOperator::Multiply => "*",
            ArithmeticOperator::Divide => "/",
            ArithmeticOperator::Modulus => "%",
        }
    }
}

/// Unary arithmetic sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticSign {
    Plus,
    Minus,
}

impl ArithmeticSign {
    pub fn token(&self) -> &'static str {
        match self {
            ArithmeticSign::Plus => "+",
            ArithmeticSign::Minus => "-",
        }
    }
}

/// Logical binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn keyword(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

/// Fields accepted by `EXTRACT(field FROM expr)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractField {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    DayOfMonth,
    DayOfWeek,
    Dow,
    DayOfYear,
    Doy,
    YearOfWeek,
    Yow,
    Hour,
    Minute,
    Second,
    TimezoneMinute,
    TimezoneHour,
}

impl ExtractField {
    /// SQL keyword for the field
    pub fn keyword(&self) -> &'static str {
        match self {
            ExtractField::Year => "YEAR",
            ExtractField::Quarter => "QUARTER",
            ExtractField::Month => "MONTH",
            ExtractField::Week => "WEEK",
            ExtractField::Day => "DAY",
            ExtractField::DayOfMonth => "DAY_OF_MONTH",
            ExtractField::DayOfWeek => "DAY_OF_WEEK",
            ExtractField::Dow => "DOW",
            ExtractField::DayOfYear => "DAY_OF_YEAR",
            ExtractField::Doy => "DOY",
            ExtractField::YearOfWeek => "YEAR_OF_WEEK",
            ExtractField::Yow => "YOW",
            ExtractField::Hour => "HOUR",
            ExtractField::Minute => "MINUTE",
            ExtractField::Second => "SECOND",
            ExtractField::TimezoneMinute => "TIMEZONE_MINUTE",
            ExtractField::TimezoneHour => "TIMEZONE_HOUR",
        }
    }
}

impl fmt::Display for ExtractField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Niladic current date/time functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrentTimeFunction {
    Time,
    Date,
    Timestamp,
    LocalTime,
    LocalTimestamp,
}

impl CurrentTimeFunction {
    pub fn keyword(&self) -> &'static str {
        match self {
            CurrentTimeFunction::Time => "CURRENT_TIME",
            CurrentTimeFunction::Date => "CURRENT_DATE",
            CurrentTimeFunction::Timestamp => "CURRENT_TIMESTAMP",
            CurrentTimeFunction::LocalTime => "LOCALTIME",
            CurrentTimeFunction::LocalTimestamp => "LOCALTIMESTAMP",
        }
    }
}

/// Window frame units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowFrameType {
    Range,
    Rows,
    Groups,
}

impl WindowFrameType {
    pub fn keyword(&self) -> &'static str {
        match self {
            WindowFrameType::Range => "RANGE",
            WindowFrameType::Rows => "ROWS",
            WindowFrameType::Groups => "GROUPS",
        }
    }
}

/// One output column of a SELECT list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    /// Rendered expression text
    pub expression: String,
    /// Output alias
    pub alias: Option<String>,
}

impl Selection {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Render as a SELECT list item; an alias identical to the expression is dropped
    pub fn render(&self) -> String {
        match &self.alias {
            Some(alias) if alias != &self.expression => {
                format!("{} AS {}", self.expression, alias)
            }
            _ => self.expression.clone(),
        }
    }
}
