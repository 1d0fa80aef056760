// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use prestolink_requester::{Location, SessionProperties, WireClient, WireError, WireEvent, WireSession, WireSink};

#[derive(Debug, Clone)]
pub enum Step {
	Send(WireEvent),
	/// Makes `execute` return a transport failure.
	Fail {
		status: u16,
		body: String,
	},
}

impl From<WireEvent> for Step {
	fn from(event: WireEvent) -> Self {
		Step::Send(event)
	}
}

/// What the scripted client observed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientLog {
	pub locations: Vec<Location>,
	pub sessions: Vec<SessionProperties>,
	pub queries: Vec<String>,
	pub delivered: usize,
	pub closes: usize,
	/// The consumer went away before the script finished.
	pub stopped_early: bool,
}

struct Inner {
	steps: Vec<Step>,
	refuse: Option<String>,
	log: Mutex<ClientLog>,
}

/// Replays the same protocol callbacks for every query.
#[derive(Clone)]
pub struct ScriptedClient {
	inner: Arc<Inner>,
}

impl ScriptedClient {
	pub fn new(events: Vec<WireEvent>) -> Self {
		Self::with_steps(events.into_iter().map(Step::from).collect())
	}

	pub fn with_steps(steps: Vec<Step>) -> Self {
		Self {
			inner: Arc::new(Inner {
				steps,
				refuse: None,
				log: Mutex::new(ClientLog::default()),
			}),
		}
	}

	/// Every `connect` fails with the given response body.
	pub fn refusing(body: impl Into<String>) -> Self {
		Self {
			inner: Arc::new(Inner {
				steps: Vec::new(),
				refuse: Some(body.into()),
				log: Mutex::new(ClientLog::default()),
			}),
		}
	}

	pub fn log(&self) -> ClientLog {
		self.inner.log.lock().clone()
	}
}

#[async_trait]
impl WireClient for ScriptedClient {
	async fn connect(
		&self,
		location: &Location,
		session: &SessionProperties,
	) -> Result<Box<dyn WireSession>, WireError> {
		{
			let mut log = self.inner.log.lock();
			log.locations.push(location.clone());
			log.sessions.push(session.clone());
		}

		if let Some(body) = &self.inner.refuse {
			return Err(WireError::Status {
				status: 502,
				body: body.clone(),
			});
		}

		Ok(Box::new(ScriptedSession {
			inner: self.inner.clone(),
		}))
	}
}

struct ScriptedSession {
	inner: Arc<Inner>,
}

#[async_trait]
impl WireSession for ScriptedSession {
	async fn execute(&mut self, query: &str, sink: &WireSink) -> Result<(), WireError> {
		self.inner.log.lock().queries.push(query.to_string());

		for step in &self.inner.steps {
			match step {
				Step::Send(event) => {
					if sink.send(event.clone()).await.is_err() {
						self.inner.log.lock().stopped_early = true;
						return Err(WireError::Disconnected);
					}
					self.inner.log.lock().delivered += 1;
				}
				Step::Fail {
					status,
					body,
				} => {
					return Err(WireError::Status {
						status: *status,
						body: body.clone(),
					});
				}
			}
		}
		Ok(())
	}

	async fn close(&mut self) -> Result<(), WireError> {
		self.inner.log.lock().closes += 1;
		Ok(())
	}
}
