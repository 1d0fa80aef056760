// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use prestolink_types::Value;
use serde::Deserialize;

/// One page of `/v1/statement` results.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryResults {
	pub id: String,
	pub next_uri: Option<String>,
	pub columns: Option<Vec<QueryColumn>>,
	pub data: Option<Vec<Vec<Value>>>,
	pub error: Option<QueryError>,
	pub stats: Option<StatementStats>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryColumn {
	pub name: String,
	#[serde(rename = "type")]
	pub type_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryError {
	pub message: String,
	pub error_code: Option<i64>,
	pub error_name: Option<String>,
}

impl Display for QueryError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match (&self.error_name, self.error_code) {
			(Some(name), Some(code)) => write!(f, "{name} ({code}): {}", self.message),
			(Some(name), None) => write!(f, "{name}: {}", self.message),
			_ => f.write_str(&self.message),
		}
	}
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementStats {
	pub state: String,
}
