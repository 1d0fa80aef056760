// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Presto as a data source for the query layer.

mod error;
mod mapper;
mod max_time;
mod source;

pub use error::ExternalError;
pub use mapper::{NativeColumn, map_column, map_columns};
pub use source::{ExternalSource, PrestoExternal};
