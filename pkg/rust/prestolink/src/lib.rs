// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod builder;

pub use builder::{Error, PrestoBuilder};
pub use prestolink_dialect as dialect;
pub use prestolink_dialect::{CompileError, Expression, PrestoDialect, SqlDialect};
pub use prestolink_external as external;
pub use prestolink_external::{ExternalError, ExternalSource, PrestoExternal};
pub use prestolink_requester as requester;
pub use prestolink_requester::{
	ConfigurationError, ExecutionError, HttpWireClient, Locator, Requester, RequesterConfig, RowStream,
	StaticLocator, WireClient,
};
pub use prestolink_types as types;
pub use prestolink_types::{Attribute, Duration, Row, Timezone, Value, ValueType};
