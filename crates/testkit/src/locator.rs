// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use prestolink_requester::{Location, Locator, LocatorError};

/// Never resolves an endpoint.
pub struct FailingLocator(pub String);

#[async_trait]
impl Locator for FailingLocator {
	async fn locate(&self) -> Result<Location, LocatorError> {
		Err(LocatorError(self.0.clone()))
	}
}

/// Resolves to a fixed endpoint and counts how often it was asked.
pub struct CountingLocator {
	location: Location,
	calls: AtomicUsize,
}

impl CountingLocator {
	pub fn new(hostname: &str, port: u16) -> Self {
		Self {
			location: Location {
				hostname: hostname.to_string(),
				port,
			},
			calls: AtomicUsize::new(0),
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Locator for CountingLocator {
	async fn locate(&self) -> Result<Location, LocatorError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(self.location.clone())
	}
}
