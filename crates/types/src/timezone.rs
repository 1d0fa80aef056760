// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimezoneError {
	#[error("time zone name is empty")]
	Empty,

	#[error("invalid character '{character}' in time zone '{name}'")]
	InvalidCharacter {
		name: String,
		character: char,
	},
}

/// Either UTC or a named (IANA) zone.
///
/// Named zones are restricted to the characters IANA identifiers use, so the
/// name can be placed inside a SQL string literal as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timezone {
	#[default]
	Utc,
	Named(String),
}

impl Timezone {
	pub fn utc() -> Self {
		Timezone::Utc
	}

	pub fn new(name: &str) -> Result<Self, TimezoneError> {
		if name.is_empty() {
			return Err(TimezoneError::Empty);
		}
		if name == "UTC" || name == "Etc/UTC" {
			return Ok(Timezone::Utc);
		}
		if let Some(character) =
			name.chars().find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '+' | '-')))
		{
			return Err(TimezoneError::InvalidCharacter {
				name: name.to_string(),
				character,
			});
		}
		Ok(Timezone::Named(name.to_string()))
	}

	pub fn is_utc(&self) -> bool {
		matches!(self, Timezone::Utc)
	}

	pub fn name(&self) -> &str {
		match self {
			Timezone::Utc => "UTC",
			Timezone::Named(name) => name,
		}
	}
}

impl Display for Timezone {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Timezone {
	type Err = TimezoneError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Timezone::new(s)
	}
}

impl TryFrom<String> for Timezone {
	type Error = TimezoneError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Timezone::new(&value)
	}
}

impl From<Timezone> for String {
	fn from(value: Timezone) -> Self {
		value.name().to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_utc_aliases() {
		assert!(Timezone::new("UTC").unwrap().is_utc());
		assert!(Timezone::new("Etc/UTC").unwrap().is_utc());
		assert!(Timezone::default().is_utc());
	}

	#[test]
	fn test_named_zone() {
		let tz: Timezone = "America/Los_Angeles".parse().unwrap();
		assert!(!tz.is_utc());
		assert_eq!(tz.to_string(), "America/Los_Angeles");
		assert_eq!(Timezone::new("Etc/GMT+5").unwrap().name(), "Etc/GMT+5");
	}

	#[test]
	fn test_rejects_quote() {
		assert_eq!(
			Timezone::new("Europe/Paris' --"),
			Err(TimezoneError::InvalidCharacter {
				name: "Europe/Paris' --".to_string(),
				character: '\'',
			})
		);
		assert_eq!(Timezone::new(""), Err(TimezoneError::Empty));
	}
}
