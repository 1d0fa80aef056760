// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Result stream adapter.
//!
//! A [`Requester`] resolves an endpoint through a [`Locator`], submits SQL
//! through a callback style [`WireClient`] and republishes what the client
//! delivers as one ordered, backpressured [`RowStream`].

mod assembler;
mod config;
mod error;
pub mod http;
mod locator;
mod requester;
mod stream;
mod wire;

pub use assembler::{AssemblerState, Emit, RowAssembler};
pub use config::{DEFAULT_CATALOG, DEFAULT_PORT, DEFAULT_SOURCE, DEFAULT_USER, RequesterConfig, SessionProperties};
pub use error::{ConfigurationError, ExecutionError, LocatorError, WireError};
pub use http::HttpWireClient;
pub use locator::{Location, Locator, StaticLocator};
pub use requester::Requester;
pub use stream::RowStream;
pub use wire::{SinkClosed, WireClient, WireEvent, WireSession, WireSink};
