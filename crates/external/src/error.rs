// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use prestolink_requester::ExecutionError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExternalError {
	#[error(transparent)]
	Execution(#[from] ExecutionError),

	#[error("invalid version response: {0}")]
	InvalidVersion(String),

	#[error("invalid max time response: {0}")]
	InvalidMaxTime(String),
}
