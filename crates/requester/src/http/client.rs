// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
	Response, StatusCode,
	header::{HeaderMap, HeaderValue},
};
use tracing::{debug, trace};

use super::message::QueryResults;
use crate::{Location, SessionProperties, WireClient, WireError, WireSession, WireSink};

const STATEMENT_PATH: &str = "/v1/statement";
const MAX_RETRIES: u32 = 10;
const RETRY_DELAY: Duration = Duration::from_millis(100);

/// Wire client speaking Presto's HTTP statement protocol.
#[derive(Clone)]
pub struct HttpWireClient {
	http: reqwest::Client,
}

impl HttpWireClient {
	pub fn new() -> Result<Self, WireError> {
		Self::with_timeout(Duration::from_secs(30))
	}

	/// Timeout applied to every single HTTP request, not to the query.
	pub fn with_timeout(timeout: Duration) -> Result<Self, WireError> {
		let http = reqwest::Client::builder().timeout(timeout).build()?;
		Ok(Self {
			http,
		})
	}
}

#[async_trait]
impl WireClient for HttpWireClient {
	async fn connect(
		&self,
		location: &Location,
		session: &SessionProperties,
	) -> Result<Box<dyn WireSession>, WireError> {
		Ok(Box::new(HttpSession {
			http: self.http.clone(),
			base_url: format!("http://{location}"),
			headers: session_headers(session)?,
			next_uri: None,
		}))
	}
}

fn session_headers(session: &SessionProperties) -> Result<HeaderMap, WireError> {
	fn value(name: &'static str, value: &str) -> Result<HeaderValue, WireError> {
		HeaderValue::from_str(value).map_err(|_| WireError::InvalidHeader {
			name,
			value: value.to_string(),
		})
	}

	let mut headers = HeaderMap::new();
	headers.insert("x-presto-user", value("x-presto-user", &session.user)?);
	headers.insert("x-presto-source", value("x-presto-source", &session.source)?);
	headers.insert("x-presto-catalog", value("x-presto-catalog", &session.catalog)?);
	if let Some(schema) = &session.schema {
		headers.insert("x-presto-schema", value("x-presto-schema", schema)?);
	}
	Ok(headers)
}

/// A single statement submitted over HTTP.
///
/// `next_uri` is kept while the query is still running so that closing the
/// session early cancels it on the coordinator.
pub struct HttpSession {
	http: reqwest::Client,
	base_url: String,
	headers: HeaderMap,
	next_uri: Option<String>,
}

impl HttpSession {
	async fn submit(&self, query: &str) -> Result<QueryResults, WireError> {
		let url = format!("{}{STATEMENT_PATH}", self.base_url);
		let mut attempt = 0;
		loop {
			let response =
				self.http.post(&url).headers(self.headers.clone()).body(query.to_string()).send().await?;
			if response.status() == StatusCode::SERVICE_UNAVAILABLE && attempt < MAX_RETRIES {
				attempt += 1;
				tokio::time::sleep(RETRY_DELAY).await;
				continue;
			}
			return decode(response).await;
		}
	}

	async fn advance(&self, uri: &str) -> Result<QueryResults, WireError> {
		let mut attempt = 0;
		loop {
			let response = self.http.get(uri).headers(self.headers.clone()).send().await?;
			if response.status() == StatusCode::SERVICE_UNAVAILABLE && attempt < MAX_RETRIES {
				attempt += 1;
				tokio::time::sleep(RETRY_DELAY).await;
				continue;
			}
			return decode(response).await;
		}
	}
}

async fn decode(response: Response) -> Result<QueryResults, WireError> {
	let status = response.status();
	if !status.is_success() {
		let body = response.text().await.unwrap_or_default();
		return Err(WireError::Status {
			status: status.as_u16(),
			body,
		});
	}
	Ok(response.json::<QueryResults>().await?)
}

#[async_trait]
impl WireSession for HttpSession {
	async fn execute(&mut self, query: &str, sink: &WireSink) -> Result<(), WireError> {
		let mut results = self.submit(query).await?;
		debug!(query_id = %results.id, "statement submitted");

		let mut columns_sent = false;
		loop {
			if let Some(stats) = &results.stats {
				trace!(query_id = %results.id, state = %stats.state, "statement page");
			}

			// Every page after the first repeats the column list.
			if !columns_sent && let Some(columns) = results.columns.take() {
				trace!(types = ?columns.iter().map(|c| c.type_name.as_str()).collect::<Vec<_>>(), "columns");
				sink.columns(columns.into_iter().map(|c| c.name).collect(), true).await?;
				columns_sent = true;
			}

			if let Some(data) = results.data.take() {
				sink.data(data).await?;
			}

			if let Some(error) = results.error.take() {
				self.next_uri = None;
				sink.error(error.to_string()).await?;
				return Ok(());
			}

			match results.next_uri.take() {
				None => {
					self.next_uri = None;
					sink.success().await?;
					return Ok(());
				}
				Some(uri) => {
					self.next_uri = Some(uri.clone());
					if sink.is_closed() {
						return Err(WireError::Disconnected);
					}
					results = self.advance(&uri).await?;
				}
			}
		}
	}

	async fn close(&mut self) -> Result<(), WireError> {
		if let Some(uri) = self.next_uri.take() {
			debug!(%uri, "cancelling running statement");
			self.http.delete(&uri).headers(self.headers.clone()).send().await?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_session_headers() {
		let session = SessionProperties {
			user: "turnilo".to_string(),
			source: "dashboards".to_string(),
			catalog: "hive".to_string(),
			schema: Some("web".to_string()),
		};
		let headers = session_headers(&session).unwrap();
		assert_eq!(headers["x-presto-user"], "turnilo");
		assert_eq!(headers["x-presto-source"], "dashboards");
		assert_eq!(headers["x-presto-catalog"], "hive");
		assert_eq!(headers["x-presto-schema"], "web");
	}

	#[test]
	fn test_session_headers_without_schema() {
		let session = SessionProperties {
			user: "u".to_string(),
			source: "s".to_string(),
			catalog: "c".to_string(),
			schema: None,
		};
		assert!(!session_headers(&session).unwrap().contains_key("x-presto-schema"));
	}

	#[test]
	fn test_session_headers_reject_control_characters() {
		let session = SessionProperties {
			user: "bad\nuser".to_string(),
			source: "s".to_string(),
			catalog: "c".to_string(),
			schema: None,
		};
		assert!(matches!(
			session_headers(&session),
			Err(WireError::InvalidHeader {
				name: "x-presto-user",
				..
			})
		));
	}
}
