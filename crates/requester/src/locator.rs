// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;

use crate::{ConfigurationError, DEFAULT_PORT, LocatorError};

/// A resolved coordinator endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
	pub hostname: String,
	pub port: u16,
}

impl Display for Location {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.hostname, self.port)
	}
}

/// Resolves the endpoint a query is sent to. Called once per execution.
#[async_trait]
pub trait Locator: Send + Sync {
	async fn locate(&self) -> Result<Location, LocatorError>;
}

/// Always resolves to the same host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLocator {
	location: Location,
}

impl StaticLocator {
	pub fn new(hostname: impl Into<String>, port: u16) -> Self {
		Self {
			location: Location {
				hostname: hostname.into(),
				port,
			},
		}
	}

	/// Parses `host`, `host:port` or `http://host:port`; the port defaults
	/// to `default_port`.
	pub fn parse(host: &str, default_port: u16) -> Result<Self, ConfigurationError> {
		let invalid = |reason: &str| ConfigurationError::InvalidHost {
			host: host.to_string(),
			reason: reason.to_string(),
		};

		let address = host.strip_prefix("http://").unwrap_or(host).trim_end_matches('/');

		let (hostname, port) = match address.rsplit_once(':') {
			Some((hostname, port)) => {
				let port = port.parse::<u16>().map_err(|_| invalid("port is not a number"))?;
				(hostname, port)
			}
			None => (address, default_port),
		};

		if hostname.is_empty() {
			return Err(invalid("hostname is empty"));
		}

		Ok(Self::new(hostname, port))
	}

	pub fn location(&self) -> &Location {
		&self.location
	}
}

impl TryFrom<&str> for StaticLocator {
	type Error = ConfigurationError;

	fn try_from(host: &str) -> Result<Self, Self::Error> {
		StaticLocator::parse(host, DEFAULT_PORT)
	}
}

#[async_trait]
impl Locator for StaticLocator {
	async fn locate(&self) -> Result<Location, LocatorError> {
		Ok(self.location.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_host_only_uses_default_port() {
		let locator = StaticLocator::try_from("presto.local").unwrap();
		assert_eq!(locator.location().to_string(), "presto.local:8889");
	}

	#[test]
	fn test_parse_host_and_port() {
		let locator = StaticLocator::parse("http://10.0.0.4:8080/", 8889).unwrap();
		assert_eq!(
			locator.location(),
			&Location {
				hostname: "10.0.0.4".to_string(),
				port: 8080,
			}
		);
	}

	#[test]
	fn test_parse_rejects_bad_port() {
		assert!(matches!(StaticLocator::parse("presto:http", 8889), Err(ConfigurationError::InvalidHost { .. })));
		assert!(matches!(StaticLocator::parse(":8080", 8889), Err(ConfigurationError::InvalidHost { .. })));
	}

	#[tokio::test]
	async fn test_locate_returns_configured_location() {
		let locator = StaticLocator::new("presto", 9000);
		assert_eq!(locator.locate().await.unwrap().port, 9000);
	}
}
