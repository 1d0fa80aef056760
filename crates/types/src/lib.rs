// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Types shared between the dialect compiler, the requester and the
//! external source: abstract value types, attribute descriptors, rows,
//! ISO-8601 durations and time zones.

mod duration;
mod timezone;
mod value;

pub use duration::{Duration, DurationError, Spans};
pub use timezone::{Timezone, TimezoneError};
pub use value::{Attribute, Row, Value, ValueType};
