// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use tracing::{Instrument, debug, debug_span, warn};

use crate::{
	ConfigurationError, DEFAULT_PORT, ExecutionError, Locator, RequesterConfig, RowStream, SessionProperties,
	StaticLocator, WireClient, WireError, WireSink,
};

/// Executes SQL text against one Presto deployment.
#[derive(Clone)]
pub struct Requester {
	locator: Arc<dyn Locator>,
	client: Arc<dyn WireClient>,
	session: SessionProperties,
	buffer: usize,
}

impl Requester {
	/// Fails with [`ConfigurationError::MissingHost`] when neither a locator
	/// nor `config.host` is given.
	pub fn new(
		config: RequesterConfig,
		locator: Option<Arc<dyn Locator>>,
		client: Arc<dyn WireClient>,
	) -> Result<Self, ConfigurationError> {
		let locator = match (locator, config.host.as_deref()) {
			(Some(locator), _) => locator,
			(None, Some(host)) if !host.is_empty() => Arc::new(StaticLocator::parse(host, DEFAULT_PORT)?),
			(None, _) => return Err(ConfigurationError::MissingHost),
		};

		Ok(Self {
			locator,
			client,
			session: config.session(),
			buffer: config.buffer.max(1),
		})
	}

	pub fn session(&self) -> &SessionProperties {
		&self.session
	}

	/// Returns the lazily dispatched row stream of `query`. Every failure is
	/// reported through the stream.
	pub fn execute(&self, query: impl Into<String>) -> RowStream {
		RowStream::new(Dispatch {
			locator: self.locator.clone(),
			client: self.client.clone(),
			session: self.session.clone(),
			query: query.into(),
			buffer: self.buffer,
		})
	}
}

pub(crate) struct Dispatch {
	locator: Arc<dyn Locator>,
	client: Arc<dyn WireClient>,
	session: SessionProperties,
	query: String,
	buffer: usize,
}

impl Dispatch {
	pub(crate) fn buffer(&self) -> usize {
		self.buffer
	}

	pub(crate) async fn run(self, sink: WireSink) {
		let span = debug_span!("requester::execute", query = %self.query);
		self.execute(sink).instrument(span).await
	}

	async fn execute(self, sink: WireSink) {
		let location = match self.locator.locate().await {
			Ok(location) => location,
			Err(error) => {
				sink.fail(ExecutionError::LocatorUnavailable(error.to_string())).await;
				return;
			}
		};
		debug!(%location, "dispatching query");

		let mut session = match self.client.connect(&location, &self.session).await {
			Ok(session) => session,
			Err(error) => {
				sink.fail(ExecutionError::Protocol(error.to_string())).await;
				return;
			}
		};

		match session.execute(&self.query, &sink).await {
			Ok(()) => {}
			Err(WireError::Disconnected) => debug!("consumer dropped the row stream"),
			Err(error) => sink.fail(ExecutionError::Protocol(error.to_string())).await,
		}

		if let Err(error) = session.close().await {
			warn!(%error, "failed to close wire session");
		}
	}
}
