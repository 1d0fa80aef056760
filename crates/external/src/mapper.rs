// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use prestolink_types::{Attribute, Row, Value, ValueType};
use tracing::warn;

/// One row of the column introspection query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeColumn {
	pub name: String,
	pub native_type: String,
	pub array_type: Option<String>,
}

impl NativeColumn {
	pub fn new(name: impl Into<String>, native_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			native_type: native_type.into(),
			array_type: None,
		}
	}

	pub fn array(name: impl Into<String>, element_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			native_type: "array".to_string(),
			array_type: Some(element_type.into()),
		}
	}

	/// Reads the `name`, `sqlType` and `arrayType` fields of a catalog row.
	pub fn from_row(row: &Row) -> Option<Self> {
		let name = row.get("name").and_then(Value::as_str)?;
		let native_type = row.get("sqlType").and_then(Value::as_str)?;
		let array_type = row.get("arrayType").and_then(Value::as_str);

		Some(Self {
			name: name.to_string(),
			native_type: native_type.to_string(),
			array_type: array_type.map(str::to_string),
		})
	}

	/// Splits `array(<element>)` into `array` and its element type.
	fn normalized(&self) -> (String, Option<String>) {
		let native_type = self.native_type.trim().to_lowercase();
		if self.array_type.is_none()
			&& let Some(element) = native_type.strip_prefix("array(").and_then(|rest| rest.strip_suffix(')'))
		{
			return ("array".to_string(), Some(element.trim().to_string()));
		}
		(native_type, self.array_type.as_ref().map(|element| element.trim().to_lowercase()))
	}
}

/// First match wins.
fn classify(native_type: &str) -> Option<ValueType> {
	if native_type.contains("timestamp") || native_type.contains("date") {
		return Some(ValueType::Time);
	}
	if native_type.contains("char") {
		return Some(ValueType::String);
	}
	match native_type {
		"integer" | "bigint" | "double" | "real" => Some(ValueType::Number),
		"boolean" => Some(ValueType::Boolean),
		_ => None,
	}
}

/// Classifies a single column, `None` when its type is not supported.
///
/// For arrays the attribute's native type is the element type.
pub fn map_column(column: &NativeColumn) -> Option<Attribute> {
	let (native_type, array_type) = column.normalized();

	if native_type == "array" {
		let element = array_type?;
		let value_type = classify(&element)?.set_of()?;
		return Some(Attribute::new(column.name.clone(), value_type, element));
	}

	let value_type = classify(&native_type)?;
	Some(Attribute::new(column.name.clone(), value_type, native_type))
}

/// Maps every supported column; the others are left out.
pub fn map_columns(columns: &[NativeColumn]) -> Vec<Attribute> {
	columns
		.iter()
		.filter_map(|column| {
			let attribute = map_column(column);
			if attribute.is_none() {
				warn!(
					column = %column.name,
					native_type = %column.native_type,
					array_type = ?column.array_type,
					"dropping column of unsupported type"
				);
			}
			attribute
		})
		.collect()
}
