// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::wire::SinkClosed;

/// Raised when a [`crate::Requester`] is constructed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
	#[error("must have a `host` or a `locator`")]
	MissingHost,

	#[error("invalid host '{host}': {reason}")]
	InvalidHost {
		host: String,
		reason: String,
	},
}

/// Delivered through the row stream, never returned from `execute`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
	#[error("locator unavailable: {0}")]
	LocatorUnavailable(String),

	#[error("protocol error: {0}")]
	Protocol(String),

	#[error("column '{name}' appears more than once in the result")]
	DuplicateColumn {
		name: String,
	},

	#[error("row {row} has {actual} values but the result has {expected} columns")]
	ColumnCountMismatch {
		row: usize,
		expected: usize,
		actual: usize,
	},
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct LocatorError(pub String);

/// Failure inside a wire client.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
	#[error(transparent)]
	Http(#[from] reqwest::Error),

	#[error("server responded {status}: {body}")]
	Status {
		status: u16,
		body: String,
	},

	#[error("invalid header {name}: {value}")]
	InvalidHeader {
		name: &'static str,
		value: String,
	},

	#[error("result consumer went away")]
	Disconnected,
}

impl From<SinkClosed> for WireError {
	fn from(_: SinkClosed) -> Self {
		WireError::Disconnected
	}
}
