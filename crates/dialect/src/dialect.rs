// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use chrono::{DateTime, Utc};
use prestolink_types::{Duration, Timezone, ValueType};

use crate::{CompileError, Expression};

/// Rendering rules of one engine, one method per operator.
///
/// Implementations must be stateless apart from immutable lookup tables.
pub trait SqlDialect: Send + Sync {
	/// Name used in error messages.
	fn name(&self) -> &'static str;

	fn null_constant(&self) -> &'static str {
		"NULL"
	}

	/// Single-quoted string literal with embedded quotes doubled.
	fn escape_literal(&self, value: &str) -> String {
		format!("'{}'", value.replace('\'', "''"))
	}

	/// Double-quoted identifier with embedded quotes doubled.
	fn escape_name(&self, name: &str) -> String {
		format!("\"{}\"", name.replace('"', "\"\""))
	}

	/// Timestamp literal, or the null constant when no time is given.
	fn time_literal(&self, time: Option<&DateTime<Utc>>) -> String {
		match time {
			Some(time) => {
				let text = time.format("%Y-%m-%d %H:%M:%S%.3f").to_string();
				let text = text.strip_suffix(".000").unwrap_or(&text);
				format!("CAST('{text}' AS TIMESTAMP)")
			}
			None => self.null_constant().to_string(),
		}
	}

	fn empty_group_by(&self) -> String;

	fn concat(&self, left: &str, right: &str) -> String;

	/// True when `search` occurs in `operand`.
	fn contains(&self, operand: &str, search: &str) -> String;

	fn regexp_test(&self, operand: &str, pattern: &str) -> String;

	fn regexp_extract(&self, operand: &str, pattern: &str) -> String;

	/// Zero-based position of `search` in `operand`, -1 when absent.
	fn index_of(&self, operand: &str, search: &str) -> String;

	fn cast(&self, from: ValueType, operand: &str, to: ValueType) -> Result<String, CompileError>;

	fn utc_to_walltime(&self, operand: &str, timezone: &Timezone) -> String;

	fn walltime_to_utc(&self, operand: &str, timezone: &Timezone) -> String;

	fn time_floor(&self, operand: &str, duration: &Duration, timezone: &Timezone) -> Result<String, CompileError>;

	fn time_bucket(&self, operand: &str, duration: &Duration, timezone: &Timezone) -> Result<String, CompileError> {
		self.time_floor(operand, duration, timezone)
	}

	fn time_part(&self, operand: &str, part: &str, timezone: &Timezone) -> Result<String, CompileError>;

	fn time_shift(&self, operand: &str, duration: &Duration, timezone: &Timezone) -> String;

	fn is_not_distinct_from(&self, left: &str, right: &str) -> String;

	fn render(&self, expression: &Expression) -> Result<String, CompileError> {
		match expression {
			Expression::TimeFloor {
				operand,
				duration,
				timezone,
			} => self.time_floor(operand, duration, timezone),
			Expression::TimeBucket {
				operand,
				duration,
				timezone,
			} => self.time_bucket(operand, duration, timezone),
			Expression::TimePart {
				operand,
				part,
				timezone,
			} => self.time_part(operand, part, timezone),
			Expression::TimeShift {
				operand,
				duration,
				timezone,
			} => Ok(self.time_shift(operand, duration, timezone)),
			Expression::Cast {
				operand,
				from,
				to,
			} => self.cast(*from, operand, *to),
			Expression::Concat {
				left,
				right,
			} => Ok(self.concat(left, right)),
			Expression::Contains {
				operand,
				search,
			} => Ok(self.contains(operand, search)),
			Expression::RegexpTest {
				operand,
				pattern,
			} => Ok(self.regexp_test(operand, pattern)),
			Expression::RegexpExtract {
				operand,
				pattern,
			} => Ok(self.regexp_extract(operand, pattern)),
			Expression::IndexOf {
				operand,
				search,
			} => Ok(self.index_of(operand, search)),
			Expression::IsNotDistinct {
				left,
				right,
			} => Ok(self.is_not_distinct_from(left, right)),
			Expression::TimeLiteral(time) => Ok(self.time_literal(time.as_ref())),
		}
	}
}
