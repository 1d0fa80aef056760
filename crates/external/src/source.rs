// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use async_trait::async_trait;
use futures_util::TryStreamExt;
use prestolink_dialect::{PrestoDialect, SqlDialect};
use prestolink_requester::{Requester, RowStream};
use prestolink_types::{Attribute, Row, Value};
use tracing::{debug, instrument, warn};

use crate::{ExternalError, NativeColumn, map_columns};

/// A queryable table of one engine.
#[async_trait]
pub trait ExternalSource: Send + Sync {
	/// Columns of the table that the query layer can work with.
	async fn introspect(&self) -> Result<Vec<Attribute>, ExternalError>;

	fn execute(&self, query: &str) -> RowStream;

	/// Names of the tables visible to the session, sorted.
	async fn list_sources(&self) -> Result<Vec<String>, ExternalError>;

	async fn version(&self) -> Result<String, ExternalError>;
}

#[derive(Clone)]
pub struct PrestoExternal {
	requester: Requester,
	dialect: PrestoDialect,
	table: String,
}

impl PrestoExternal {
	pub fn new(requester: Requester, table: impl Into<String>) -> Self {
		Self {
			requester,
			dialect: PrestoDialect::new(),
			table: table.into(),
		}
	}

	pub fn table(&self) -> &str {
		&self.table
	}

	pub fn dialect(&self) -> &PrestoDialect {
		&self.dialect
	}

	pub(crate) async fn collect(&self, query: String) -> Result<Vec<Row>, ExternalError> {
		Ok(self.requester.execute(query).try_collect().await?)
	}

	fn introspection_query(&self) -> String {
		format!(
			"SELECT c.column_name AS \"name\", c.data_type AS \"sqlType\", null AS \"arrayType\" \
			 FROM information_schema.columns c WHERE table_name = {}",
			self.dialect.escape_literal(&self.table)
		)
	}

	fn list_query(&self) -> String {
		match &self.requester.session().schema {
			Some(schema) => format!("SHOW TABLES FROM {}", self.dialect.escape_name(schema)),
			None => "SHOW TABLES".to_string(),
		}
	}
}

fn first_value(row: &Row) -> Option<&Value> {
	row.values().next()
}

#[async_trait]
impl ExternalSource for PrestoExternal {
	#[instrument(name = "external::introspect", level = "debug", skip(self), fields(table = %self.table))]
	async fn introspect(&self) -> Result<Vec<Attribute>, ExternalError> {
		let rows = self.collect(self.introspection_query()).await?;

		let columns: Vec<NativeColumn> = rows
			.iter()
			.filter_map(|row| {
				let column = NativeColumn::from_row(row);
				if column.is_none() {
					warn!(?row, "skipping malformed catalog row");
				}
				column
			})
			.collect();

		let attributes = map_columns(&columns);
		debug!(columns = columns.len(), attributes = attributes.len(), "introspected");
		Ok(attributes)
	}

	fn execute(&self, query: &str) -> RowStream {
		self.requester.execute(query)
	}

	#[instrument(name = "external::list_sources", level = "debug", skip(self))]
	async fn list_sources(&self) -> Result<Vec<String>, ExternalError> {
		let rows = self.collect(self.list_query()).await?;

		let mut sources: Vec<String> = rows
			.iter()
			.filter_map(first_value)
			.map(|value| match value {
				Value::String(name) => name.clone(),
				other => other.to_string(),
			})
			.collect();
		sources.sort();
		Ok(sources)
	}

	#[instrument(name = "external::version", level = "debug", skip(self))]
	async fn version(&self) -> Result<String, ExternalError> {
		let rows = self.collect("SELECT node_version FROM system.runtime.nodes WHERE coordinator = true".to_string()).await?;

		let [row] = rows.as_slice() else {
			return Err(ExternalError::InvalidVersion(format!("expected one row, got {}", rows.len())));
		};

		match first_value(row) {
			Some(Value::String(version)) => Ok(version.clone()),
			Some(other) => Err(ExternalError::InvalidVersion(format!("expected a string, got {other}"))),
			None => Err(ExternalError::InvalidVersion("row has no columns".to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use prestolink_requester::{ExecutionError, RequesterConfig, WireEvent};
	use prestolink_testkit::{ScriptedClient, columns, data};
	use prestolink_types::ValueType;
	use serde_json::json;

	use super::*;

	fn external(client: &ScriptedClient, schema: Option<&str>) -> PrestoExternal {
		let config = RequesterConfig {
			host: Some("presto".to_string()),
			schema: schema.map(str::to_string),
			..RequesterConfig::default()
		};
		let requester = Requester::new(config, None, Arc::new(client.clone())).unwrap();
		PrestoExternal::new(requester, "wiki")
	}

	#[tokio::test]
	async fn test_introspect() {
		let client = ScriptedClient::new(vec![
			columns(&["name", "sqlType", "arrayType"]),
			data(vec![
				vec![json!("__time"), json!("timestamp"), json!(null)],
				vec![json!("page"), json!("varchar"), json!(null)],
				vec![json!("location"), json!("varbinary"), json!(null)],
				vec![json!("tags"), json!("array(varchar)"), json!(null)],
				vec![json!("added"), json!("bigint"), json!(null)],
			]),
			WireEvent::Success,
		]);

		let attributes = external(&client, None).introspect().await.unwrap();
		assert_eq!(
			attributes,
			vec![
				Attribute::new("__time", ValueType::Time, "timestamp"),
				Attribute::new("page", ValueType::String, "varchar"),
				Attribute::new("tags", ValueType::SetString, "varchar"),
				Attribute::new("added", ValueType::Number, "bigint"),
			]
		);
		assert_eq!(
			client.log().queries,
			vec![
				"SELECT c.column_name AS \"name\", c.data_type AS \"sqlType\", null AS \"arrayType\" \
				 FROM information_schema.columns c WHERE table_name = 'wiki'"
					.to_string()
			]
		);
	}

	#[tokio::test]
	async fn test_introspect_escapes_table_name() {
		let client = ScriptedClient::new(vec![columns(&["name", "sqlType", "arrayType"]), WireEvent::Success]);
		let requester = Requester::new(RequesterConfig::with_host("presto"), None, Arc::new(client.clone())).unwrap();

		let attributes = PrestoExternal::new(requester, "o'brien").introspect().await.unwrap();
		assert!(attributes.is_empty());
		assert!(client.log().queries[0].ends_with("WHERE table_name = 'o''brien'"));
	}

	#[tokio::test]
	async fn test_introspect_propagates_execution_error() {
		let client = ScriptedClient::new(vec![WireEvent::Error("TABLE_NOT_FOUND".to_string())]);

		let result = external(&client, None).introspect().await;
		assert_eq!(result, Err(ExternalError::Execution(ExecutionError::Protocol("TABLE_NOT_FOUND".to_string()))));
	}

	#[tokio::test]
	async fn test_list_sources_sorted() {
		let client = ScriptedClient::new(vec![
			columns(&["Table"]),
			data(vec![vec![json!("wikipedia")], vec![json!("clicks")], vec![json!("orders")]]),
			WireEvent::Success,
		]);

		let sources = external(&client, Some("turnilo")).list_sources().await.unwrap();
		assert_eq!(sources, vec!["clicks", "orders", "wikipedia"]);
		assert_eq!(client.log().queries, vec!["SHOW TABLES FROM \"turnilo\"".to_string()]);
	}

	#[tokio::test]
	async fn test_list_sources_without_schema() {
		let client = ScriptedClient::new(vec![columns(&["Table"]), WireEvent::Success]);

		let sources = external(&client, None).list_sources().await.unwrap();
		assert!(sources.is_empty());
		assert_eq!(client.log().queries, vec!["SHOW TABLES".to_string()]);
	}

	#[tokio::test]
	async fn test_version() {
		let client = ScriptedClient::new(vec![
			columns(&["node_version"]),
			data(vec![vec![json!("0.215")]]),
			WireEvent::Success,
		]);

		assert_eq!(external(&client, None).version().await.unwrap(), "0.215");
	}

	#[tokio::test]
	async fn test_version_requires_exactly_one_row() {
		let none = ScriptedClient::new(vec![columns(&["node_version"]), WireEvent::Success]);
		assert!(matches!(external(&none, None).version().await, Err(ExternalError::InvalidVersion(_))));

		let two = ScriptedClient::new(vec![
			columns(&["node_version"]),
			data(vec![vec![json!("0.215")], vec![json!("0.216")]]),
			WireEvent::Success,
		]);
		assert!(matches!(external(&two, None).version().await, Err(ExternalError::InvalidVersion(_))));
	}

	#[tokio::test]
	async fn test_version_must_be_a_string() {
		let client =
			ScriptedClient::new(vec![columns(&["node_version"]), data(vec![vec![json!(215)]]), WireEvent::Success]);
		assert!(matches!(external(&client, None).version().await, Err(ExternalError::InvalidVersion(_))));
	}

	#[tokio::test]
	async fn test_execute_streams_rows() {
		let client = ScriptedClient::new(vec![columns(&["n"]), data(vec![vec![json!(1)], vec![json!(2)]]), WireEvent::Success]);

		let rows: Vec<Row> = external(&client, None).execute("SELECT n FROM wiki").try_collect().await.unwrap();
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[1]["n"], json!(2));
	}
}
