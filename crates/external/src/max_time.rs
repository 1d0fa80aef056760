// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use prestolink_dialect::SqlDialect;
use prestolink_types::Value;
use tracing::instrument;

use crate::{ExternalError, PrestoExternal};

const MAX_TIME: &str = "maxTime";

impl PrestoExternal {
	/// Latest value of the time attribute, `None` when the table is empty.
	#[instrument(name = "external::max_time", level = "debug", skip(self), fields(table = %self.table()))]
	pub async fn max_time(&self, attribute: &str) -> Result<Option<DateTime<Utc>>, ExternalError> {
		let dialect = self.dialect();
		let query = format!(
			"SELECT MAX({}) AS {} FROM {}",
			dialect.escape_name(attribute),
			dialect.escape_name(MAX_TIME),
			dialect.escape_name(self.table())
		);

		let rows = self.collect(query).await?;
		let Some(row) = rows.first() else {
			return Ok(None);
		};

		match row.get(MAX_TIME) {
			None | Some(Value::Null) => Ok(None),
			Some(Value::String(text)) => parse_timestamp(text).map(Some),
			Some(Value::Number(millis)) => millis
				.as_i64()
				.and_then(DateTime::<Utc>::from_timestamp_millis)
				.map(Some)
				.ok_or_else(|| ExternalError::InvalidMaxTime(millis.to_string())),
			Some(other) => Err(ExternalError::InvalidMaxTime(other.to_string())),
		}
	}
}

/// Accepts RFC 3339 as well as Presto's `YYYY-MM-DD HH:MM:SS.fff` and plain dates.
fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, ExternalError> {
	if let Ok(time) = DateTime::parse_from_rfc3339(text) {
		return Ok(time.with_timezone(&Utc));
	}
	if let Ok(time) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
		return Ok(time.and_utc());
	}
	NaiveDate::parse_from_str(text, "%Y-%m-%d")
		.ok()
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|time| time.and_utc())
		.ok_or_else(|| ExternalError::InvalidMaxTime(text.to_string()))
}
