// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! SQL dialect compiler.
//!
//! Every operator of the query algebra renders to a SQL fragment from
//! already rendered operand text. Rendering is pure: the lookup tables are
//! immutable statics shared by all callers.

mod dialect;
mod error;
mod expression;
mod presto;

pub use dialect::SqlDialect;
pub use error::CompileError;
pub use expression::Expression;
pub use presto::PrestoDialect;
