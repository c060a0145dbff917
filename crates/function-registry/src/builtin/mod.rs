// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin rewrite rules
//!
//! This module contains the static rule sets shipped for each dialect.

pub mod clickhouse;
