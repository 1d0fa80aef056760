// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

pub const DEFAULT_USER: &str = "default_user";
pub const DEFAULT_SOURCE: &str = "default_source";
pub const DEFAULT_CATALOG: &str = "hive";
pub const DEFAULT_PORT: u16 = 8889;

const DEFAULT_BUFFER: usize = 16;

/// Connection parameters of a [`crate::Requester`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequesterConfig {
	/// `host` or `host:port`; ignored when a locator is supplied.
	pub host: Option<String>,
	pub user: Option<String>,
	pub source: Option<String>,
	pub catalog: Option<String>,
	pub schema: Option<String>,
	/// Number of protocol deliveries buffered ahead of the consumer.
	pub buffer: usize,
}

impl Default for RequesterConfig {
	fn default() -> Self {
		Self {
			host: None,
			user: None,
			source: None,
			catalog: None,
			schema: None,
			buffer: DEFAULT_BUFFER,
		}
	}
}

impl RequesterConfig {
	pub fn with_host(host: impl Into<String>) -> Self {
		Self {
			host: Some(host.into()),
			..Self::default()
		}
	}

	pub fn session(&self) -> SessionProperties {
		fn or_default(value: &Option<String>, default: &str) -> String {
			match value.as_deref() {
				Some(value) if !value.is_empty() => value.to_string(),
				_ => default.to_string(),
			}
		}

		SessionProperties {
			user: or_default(&self.user, DEFAULT_USER),
			source: or_default(&self.source, DEFAULT_SOURCE),
			catalog: or_default(&self.catalog, DEFAULT_CATALOG),
			schema: self.schema.clone().filter(|schema| !schema.is_empty()),
		}
	}
}

/// Resolved session identity sent with every statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProperties {
	pub user: String,
	pub source: String,
	pub catalog: String,
	pub schema: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_session_defaults() {
		let session = RequesterConfig::default().session();
		assert_eq!(session.user, "default_user");
		assert_eq!(session.source, "default_source");
		assert_eq!(session.catalog, "hive");
		assert_eq!(session.schema, None);
	}

	#[test]
	fn test_empty_values_fall_back_to_defaults() {
		let config = RequesterConfig {
			user: Some(String::new()),
			schema: Some(String::new()),
			..RequesterConfig::default()
		};
		let session = config.session();
		assert_eq!(session.user, "default_user");
		assert_eq!(session.schema, None);
	}

	#[test]
	fn test_deserialize_partial_config() {
		let config: RequesterConfig =
			serde_json::from_str(r#"{"host": "presto:8080", "catalog": "iceberg", "schema": "web"}"#).unwrap();
		assert_eq!(config.host.as_deref(), Some("presto:8080"));
		assert_eq!(config.buffer, 16);

		let session = config.session();
		assert_eq!(session.catalog, "iceberg");
		assert_eq!(session.schema.as_deref(), Some("web"));
		assert_eq!(session.user, "default_user");
	}
}
