// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use prestolink_external::PrestoExternal;
use prestolink_requester::{
	ConfigurationError, HttpWireClient, Locator, Requester, RequesterConfig, WireClient, WireError,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Configuration(#[from] ConfigurationError),

	#[error(transparent)]
	Wire(#[from] WireError),
}

/// Wires a [`Requester`] from configuration. Without an explicit client the
/// HTTP statement protocol is used.
pub struct PrestoBuilder {
	config: RequesterConfig,
	locator: Option<Arc<dyn Locator>>,
	client: Option<Arc<dyn WireClient>>,
}

impl PrestoBuilder {
	pub fn new(config: RequesterConfig) -> Self {
		Self {
			config,
			locator: None,
			client: None,
		}
	}

	pub fn with_locator(mut self, locator: Arc<dyn Locator>) -> Self {
		self.locator = Some(locator);
		self
	}

	pub fn with_client(mut self, client: Arc<dyn WireClient>) -> Self {
		self.client = Some(client);
		self
	}

	pub fn requester(self) -> Result<Requester, Error> {
		let client = match self.client {
			Some(client) => client,
			None => Arc::new(HttpWireClient::new()?),
		};
		Ok(Requester::new(self.config, self.locator, client)?)
	}

	pub fn external(self, table: impl Into<String>) -> Result<PrestoExternal, Error> {
		Ok(PrestoExternal::new(self.requester()?, table))
	}
}
