// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Test doubles for the wire protocol and endpoint resolution.

mod client;
mod locator;

use std::sync::Once;

pub use client::{ClientLog, ScriptedClient, Step};
pub use locator::{CountingLocator, FailingLocator};
use prestolink_requester::WireEvent;
use prestolink_types::Value;
use tracing_subscriber::EnvFilter;

/// Complete column list.
pub fn columns(names: &[&str]) -> WireEvent {
	WireEvent::Columns {
		names: names.iter().map(|name| name.to_string()).collect(),
		complete: true,
	}
}

/// Part of a column list; more parts follow.
pub fn partial_columns(names: &[&str]) -> WireEvent {
	WireEvent::Columns {
		names: names.iter().map(|name| name.to_string()).collect(),
		complete: false,
	}
}

pub fn data(rows: Vec<Vec<Value>>) -> WireEvent {
	WireEvent::Data(rows)
}

/// Installs a fmt subscriber honouring `RUST_LOG`, once per process.
pub fn init_tracing() {
	static INIT: Once = Once::new();
	INIT.call_once(|| {
		let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
	});
}
