// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Dialect-specific query writers

#[cfg(feature = "clickhouse")]
pub mod clickhouse;

#[cfg(feature = "clickhouse")]
pub use clickhouse::{CLICKHOUSE_CAPABILITIES, ClickHouseQueryWriter};
