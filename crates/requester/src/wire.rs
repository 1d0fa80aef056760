// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use async_trait::async_trait;
use prestolink_types::Value;
use tokio::sync::mpsc;

use crate::{ExecutionError, Location, SessionProperties, WireError};

/// One protocol callback, in the order the wire client produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum WireEvent {
	/// Column names, possibly split across several deliveries; `complete`
	/// marks the last part of the list.
	Columns {
		names: Vec<String>,
		complete: bool,
	},
	/// A batch of positional rows.
	Data(Vec<Vec<Value>>),
	Success,
	Error(String),
}

pub(crate) enum Delivery {
	Event(WireEvent),
	Failed(ExecutionError),
}

/// The consumer has dropped the row stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("row stream closed")]
pub struct SinkClosed;

/// Callback surface handed to a [`WireSession`].
///
/// Every call waits while the consumer is behind, and fails with
/// [`SinkClosed`] once the consumer is gone; clients should stop fetching
/// when that happens.
#[derive(Debug, Clone)]
pub struct WireSink {
	tx: mpsc::Sender<Delivery>,
}

impl WireSink {
	pub(crate) fn new(tx: mpsc::Sender<Delivery>) -> Self {
		Self {
			tx,
		}
	}

	pub async fn columns(&self, names: Vec<String>, complete: bool) -> Result<(), SinkClosed> {
		self.send(WireEvent::Columns {
			names,
			complete,
		})
		.await
	}

	pub async fn data(&self, rows: Vec<Vec<Value>>) -> Result<(), SinkClosed> {
		self.send(WireEvent::Data(rows)).await
	}

	pub async fn success(&self) -> Result<(), SinkClosed> {
		self.send(WireEvent::Success).await
	}

	pub async fn error(&self, message: impl Into<String>) -> Result<(), SinkClosed> {
		self.send(WireEvent::Error(message.into())).await
	}

	pub async fn send(&self, event: WireEvent) -> Result<(), SinkClosed> {
		self.tx.send(Delivery::Event(event)).await.map_err(|_| SinkClosed)
	}

	pub fn is_closed(&self) -> bool {
		self.tx.is_closed()
	}

	pub(crate) async fn fail(&self, error: ExecutionError) {
		// nobody left to tell when this fails
		let _ = self.tx.send(Delivery::Failed(error)).await;
	}
}

/// Opens protocol sessions against a located endpoint.
#[async_trait]
pub trait WireClient: Send + Sync {
	async fn connect(
		&self,
		location: &Location,
		session: &SessionProperties,
	) -> Result<Box<dyn WireSession>, WireError>;
}

/// One query execution on the wire.
#[async_trait]
pub trait WireSession: Send {
	/// Submits `query` and reports columns, data and exactly one terminal
	/// signal through `sink`. An `Err` return is reported to the consumer as
	/// a protocol error unless a terminal signal was already sent.
	async fn execute(&mut self, query: &str, sink: &WireSink) -> Result<(), WireError>;

	/// Releases the session. Called exactly once per execution.
	async fn close(&mut self) -> Result<(), WireError>;
}
