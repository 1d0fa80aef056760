// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Presto REST statement protocol.

mod client;
mod message;

pub use client::{HttpSession, HttpWireClient};
