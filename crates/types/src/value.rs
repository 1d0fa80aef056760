// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	fmt::{Display, Formatter},
	str::FromStr,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A scalar cell as delivered by the engine.
pub type Value = serde_json::Value;

/// One result row, keyed by column name in column order.
pub type Row = IndexMap<String, Value>;

/// Abstract value type of an attribute in the query algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
	#[serde(rename = "TIME")]
	Time,
	#[serde(rename = "STRING")]
	String,
	#[serde(rename = "NUMBER")]
	Number,
	#[serde(rename = "BOOLEAN")]
	Boolean,
	#[serde(rename = "SET/STRING")]
	SetString,
	#[serde(rename = "SET/TIME")]
	SetTime,
	#[serde(rename = "SET/NUMBER")]
	SetNumber,
	#[serde(rename = "SET/BOOLEAN")]
	SetBoolean,
}

impl ValueType {
	pub fn as_str(&self) -> &'static str {
		match self {
			ValueType::Time => "TIME",
			ValueType::String => "STRING",
			ValueType::Number => "NUMBER",
			ValueType::Boolean => "BOOLEAN",
			ValueType::SetString => "SET/STRING",
			ValueType::SetTime => "SET/TIME",
			ValueType::SetNumber => "SET/NUMBER",
			ValueType::SetBoolean => "SET/BOOLEAN",
		}
	}

	/// The SET/* type whose elements are of this type.
	/// Returns `None` for types that are already sets.
	pub fn set_of(&self) -> Option<ValueType> {
		match self {
			ValueType::Time => Some(ValueType::SetTime),
			ValueType::String => Some(ValueType::SetString),
			ValueType::Number => Some(ValueType::SetNumber),
			ValueType::Boolean => Some(ValueType::SetBoolean),
			_ => None,
		}
	}

	pub fn is_set(&self) -> bool {
		self.as_str().starts_with("SET/")
	}
}

impl Display for ValueType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ValueType {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"TIME" => Ok(ValueType::Time),
			"STRING" => Ok(ValueType::String),
			"NUMBER" => Ok(ValueType::Number),
			"BOOLEAN" => Ok(ValueType::Boolean),
			"SET/STRING" => Ok(ValueType::SetString),
			"SET/TIME" => Ok(ValueType::SetTime),
			"SET/NUMBER" => Ok(ValueType::SetNumber),
			"SET/BOOLEAN" => Ok(ValueType::SetBoolean),
			_ => Err(format!("unknown value type '{s}'")),
		}
	}
}

/// Attribute descriptor produced by schema introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
	pub name: String,
	#[serde(rename = "type")]
	pub value_type: ValueType,
	pub native_type: String,
}

impl Attribute {
	pub fn new(name: impl Into<String>, value_type: ValueType, native_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value_type,
			native_type: native_type.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_value_type_display_roundtrips_through_from_str() {
		for ty in [ValueType::Time, ValueType::SetBoolean, ValueType::SetString] {
			assert_eq!(ty.to_string().parse::<ValueType>().unwrap(), ty);
		}
		assert!("SET/SET/TIME".parse::<ValueType>().is_err());
	}

	#[test]
	fn test_set_of() {
		assert_eq!(ValueType::Number.set_of(), Some(ValueType::SetNumber));
		assert_eq!(ValueType::SetNumber.set_of(), None);
		assert!(ValueType::SetTime.is_set());
		assert!(!ValueType::Time.is_set());
	}

	#[test]
	fn test_attribute_serializes_with_wire_type_names() {
		let attr = Attribute::new("tags", ValueType::SetString, "varchar");
		let json = serde_json::to_value(&attr).unwrap();
		assert_eq!(json["type"], "SET/STRING");
		assert_eq!(json["native_type"], "varchar");
	}
}
