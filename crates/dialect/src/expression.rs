// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use chrono::{DateTime, Utc};
use prestolink_types::{Duration, Timezone, ValueType};

/// One operator invocation handed to the compiler.
///
/// Operands are SQL fragments the caller has already rendered for the
/// nested sub-expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
	TimeFloor {
		operand: String,
		duration: Duration,
		timezone: Timezone,
	},
	TimeBucket {
		operand: String,
		duration: Duration,
		timezone: Timezone,
	},
	TimePart {
		operand: String,
		part: String,
		timezone: Timezone,
	},
	TimeShift {
		operand: String,
		duration: Duration,
		timezone: Timezone,
	},
	Cast {
		operand: String,
		from: ValueType,
		to: ValueType,
	},
	Concat {
		left: String,
		right: String,
	},
	Contains {
		operand: String,
		search: String,
	},
	RegexpTest {
		operand: String,
		pattern: String,
	},
	RegexpExtract {
		operand: String,
		pattern: String,
	},
	IndexOf {
		operand: String,
		search: String,
	},
	IsNotDistinct {
		left: String,
		right: String,
	},
	TimeLiteral(Option<DateTime<Utc>>),
}

impl Expression {
	pub fn operator(&self) -> &'static str {
		match self {
			Expression::TimeFloor {
				..
			} => "TIME_FLOOR",
			Expression::TimeBucket {
				..
			} => "TIME_BUCKET",
			Expression::TimePart {
				..
			} => "TIME_PART",
			Expression::TimeShift {
				..
			} => "TIME_SHIFT",
			Expression::Cast {
				..
			} => "CAST",
			Expression::Concat {
				..
			} => "CONCAT",
			Expression::Contains {
				..
			} => "CONTAINS",
			Expression::RegexpTest {
				..
			} => "MATCH",
			Expression::RegexpExtract {
				..
			} => "REGEXP_EXTRACT",
			Expression::IndexOf {
				..
			} => "INDEX_OF",
			Expression::IsNotDistinct {
				..
			} => "IS_NOT_DISTINCT",
			Expression::TimeLiteral(_) => "TIME_LITERAL",
		}
	}
}
