// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use once_cell::sync::Lazy;
use prestolink_types::{Duration, Timezone, ValueType};

use crate::{CompileError, SqlDialect};

const DIALECT: &str = "Presto";

/// Truncation unit for every duration a bucket can be floored to.
static TIME_BUCKETING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
	HashMap::from([
		("PT1S", "second"),
		("PT1M", "minute"),
		("PT1H", "hour"),
		("P1D", "day"),
		("P1W", "week"),
		("P1M", "month"),
		("P3M", "quarter"),
		("P1Y", "year"),
	])
});

// `$$` is replaced by the operand in wall time.
static TIME_PART_TO_FUNCTION: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
	HashMap::from([
		("SECOND_OF_MINUTE", "SECOND($$)"),
		("SECOND_OF_HOUR", "(MINUTE($$)*60+SECOND($$))"),
		("SECOND_OF_DAY", "((HOUR($$)*60+MINUTE($$))*60+SECOND($$))"),
		("SECOND_OF_WEEK", "((((DOW($$)-1)*24+HOUR($$))*60+MINUTE($$))*60+SECOND($$))"),
		("SECOND_OF_MONTH", "((((DAY($$)-1)*24+HOUR($$))*60+MINUTE($$))*60+SECOND($$))"),
		("SECOND_OF_YEAR", "((((DOY($$)-1)*24+HOUR($$))*60+MINUTE($$))*60+SECOND($$))"),
		("MINUTE_OF_HOUR", "MINUTE($$)"),
		("MINUTE_OF_DAY", "(HOUR($$)*60+MINUTE($$))"),
		("MINUTE_OF_WEEK", "(((DOW($$)-1)*24+HOUR($$))*60+MINUTE($$))"),
		("MINUTE_OF_MONTH", "(((DAY($$)-1)*24+HOUR($$))*60+MINUTE($$))"),
		("MINUTE_OF_YEAR", "(((DOY($$)-1)*24+HOUR($$))*60+MINUTE($$))"),
		("HOUR_OF_DAY", "HOUR($$)"),
		("HOUR_OF_WEEK", "((DOW($$)-1)*24+HOUR($$))"),
		("HOUR_OF_MONTH", "((DAY($$)-1)*24+HOUR($$))"),
		("HOUR_OF_YEAR", "((DOY($$)-1)*24+HOUR($$))"),
		("DAY_OF_WEEK", "DOW($$)"),
		("DAY_OF_MONTH", "DAY($$)"),
		("DAY_OF_YEAR", "DOY($$)"),
		("WEEK_OF_YEAR", "WEEK($$)"),
		("MONTH_OF_YEAR", "MONTH($$)"),
		("YEAR", "YEAR($$)"),
	])
});

// Keyed by (to, from). Numbers on the TIME side are epoch milliseconds.
static CAST_TO_FUNCTION: Lazy<HashMap<(ValueType, ValueType), &'static str>> = Lazy::new(|| {
	HashMap::from([
		((ValueType::Time, ValueType::Number), "CAST(FROM_UNIXTIME(CAST($$ AS DOUBLE) / 1000) AS TIMESTAMP)"),
		((ValueType::Number, ValueType::Time), "CAST(TO_UNIXTIME(CAST($$ AS TIMESTAMP)) * 1000 AS BIGINT)"),
		((ValueType::Number, ValueType::String), "CAST($$ AS BIGINT)"),
		((ValueType::String, ValueType::Number), "CAST($$ AS VARCHAR)"),
		((ValueType::String, ValueType::String), "CAST($$ AS VARCHAR)"),
	])
});

/// Presto / Trino SQL.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrestoDialect;

impl PrestoDialect {
	pub fn new() -> Self {
		Self
	}
}

impl SqlDialect for PrestoDialect {
	fn name(&self) -> &'static str {
		DIALECT
	}

	// Presto rejects an empty GROUP BY, so group by a constant.
	fn empty_group_by(&self) -> String {
		"GROUP BY ''=''".to_string()
	}

	fn concat(&self, left: &str, right: &str) -> String {
		format!("CONCAT({left},{right})")
	}

	fn contains(&self, operand: &str, search: &str) -> String {
		format!("POSITION({search} IN {operand})>0")
	}

	fn regexp_test(&self, operand: &str, pattern: &str) -> String {
		format!("REGEXP_LIKE({operand}, {})", self.escape_literal(pattern))
	}

	fn regexp_extract(&self, operand: &str, pattern: &str) -> String {
		format!("REGEXP_EXTRACT({operand}, {})", self.escape_literal(pattern))
	}

	fn index_of(&self, operand: &str, search: &str) -> String {
		format!("POSITION({search} IN {operand}) - 1")
	}

	fn cast(&self, from: ValueType, operand: &str, to: ValueType) -> Result<String, CompileError> {
		let template = CAST_TO_FUNCTION.get(&(to, from)).ok_or(CompileError::UnsupportedCast {
			dialect: DIALECT,
			from,
			to,
		})?;
		Ok(template.replace("$$", operand))
	}

	fn utc_to_walltime(&self, operand: &str, timezone: &Timezone) -> String {
		if timezone.is_utc() {
			return operand.to_string();
		}
		format!("({operand} AT TIME ZONE 'UTC' AT TIME ZONE '{timezone}')")
	}

	fn walltime_to_utc(&self, operand: &str, timezone: &Timezone) -> String {
		if timezone.is_utc() {
			return operand.to_string();
		}
		format!("({operand} AT TIME ZONE '{timezone}' AT TIME ZONE 'UTC')")
	}

	fn time_floor(&self, operand: &str, duration: &Duration, timezone: &Timezone) -> Result<String, CompileError> {
		let unit = TIME_BUCKETING.get(duration.to_string().as_str()).ok_or(CompileError::UnsupportedDuration {
			dialect: DIALECT,
			duration: *duration,
		})?;
		let truncated = format!("DATE_TRUNC('{unit}', {})", self.utc_to_walltime(operand, timezone));
		Ok(self.walltime_to_utc(&truncated, timezone))
	}

	fn time_part(&self, operand: &str, part: &str, timezone: &Timezone) -> Result<String, CompileError> {
		let template = TIME_PART_TO_FUNCTION.get(part).ok_or_else(|| CompileError::UnsupportedPart {
			dialect: DIALECT,
			part: part.to_string(),
		})?;
		Ok(template.replace("$$", &self.utc_to_walltime(operand, timezone)))
	}

	// Presto has no WEEK interval unit; weeks are added as days.
	fn time_shift(&self, operand: &str, duration: &Duration, _timezone: &Timezone) -> String {
		let spans = duration.spans();
		if duration.is_week_only() {
			return format!("{operand}{}", interval(u64::from(spans.week) * 7, "DAY"));
		}

		let mut shifted = operand.to_string();
		for (value, unit) in [
			(spans.year, "YEAR"),
			(spans.month, "MONTH"),
			(spans.day, "DAY"),
			(spans.hour, "HOUR"),
			(spans.minute, "MINUTE"),
			(spans.second, "SECOND"),
		] {
			if value != 0 {
				shifted.push_str(&interval(u64::from(value), unit));
			}
		}
		shifted
	}

	fn is_not_distinct_from(&self, left: &str, right: &str) -> String {
		let null = self.null_constant();
		if left == null {
			return format!("{right} IS {null}");
		}
		if right == null {
			return format!("{left} IS {null}");
		}
		format!("({left} IN ({right}))")
	}
}

fn interval(value: u64, unit: &str) -> String {
	format!(" + INTERVAL '{value}' {unit}")
}
