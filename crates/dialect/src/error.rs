// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use prestolink_types::{Duration, ValueType};

/// Raised while rendering, before anything is sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
	#[error("unsupported cast from {from} to {to} in {dialect} dialect")]
	UnsupportedCast {
		dialect: &'static str,
		from: ValueType,
		to: ValueType,
	},

	#[error("unsupported duration '{duration}' in {dialect} dialect")]
	UnsupportedDuration {
		dialect: &'static str,
		duration: Duration,
	},

	#[error("unsupported part {part} in {dialect} dialect")]
	UnsupportedPart {
		dialect: &'static str,
		part: String,
	},
}
