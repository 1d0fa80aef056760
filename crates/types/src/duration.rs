// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
	#[error("can not parse duration '{0}'")]
	Invalid(String),

	#[error("duration '{0}' is empty")]
	Empty(String),
}

/// Calendar spans of a duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Spans {
	pub year: u32,
	pub month: u32,
	pub week: u32,
	pub day: u32,
	pub hour: u32,
	pub minute: u32,
	pub second: u32,
}

impl Spans {
	fn is_empty(&self) -> bool {
		*self == Spans::default()
	}

	fn has_time(&self) -> bool {
		self.hour != 0 || self.minute != 0 || self.second != 0
	}

	fn is_week_only(&self) -> bool {
		self.week != 0
			&& Spans {
				week: 0,
				..*self
			}
			.is_empty()
	}
}

/// An ISO-8601 period such as `PT1H`, `P1W` or `P1Y2M3DT4H`.
///
/// Weeks can not be combined with other units. The canonical string form
/// (see [`Display`]) is what the dialect tables are keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Duration {
	spans: Spans,
}

impl Duration {
	pub fn new(spans: Spans) -> Result<Self, DurationError> {
		if spans.is_empty() {
			return Err(DurationError::Empty(format!("{spans:?}")));
		}
		if spans.week != 0 && !spans.is_week_only() {
			return Err(DurationError::Invalid(format!("{spans:?}")));
		}
		Ok(Self {
			spans,
		})
	}

	pub fn spans(&self) -> Spans {
		self.spans
	}

	pub fn is_week_only(&self) -> bool {
		self.spans.is_week_only()
	}
}

impl Display for Duration {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let s = &self.spans;
		if s.is_week_only() {
			return write!(f, "P{}W", s.week);
		}

		f.write_str("P")?;
		for (value, unit) in [(s.year, 'Y'), (s.month, 'M'), (s.day, 'D')] {
			if value != 0 {
				write!(f, "{value}{unit}")?;
			}
		}
		if s.has_time() {
			f.write_str("T")?;
			for (value, unit) in [(s.hour, 'H'), (s.minute, 'M'), (s.second, 'S')] {
				if value != 0 {
					write!(f, "{value}{unit}")?;
				}
			}
		}
		Ok(())
	}
}

impl FromStr for Duration {
	type Err = DurationError;

	fn from_str(input: &str) -> Result<Self, Self::Err> {
		let invalid = || DurationError::Invalid(input.to_string());

		let rest = input.strip_prefix('P').ok_or_else(invalid)?;
		let mut spans = Spans::default();

		if let Some(weeks) = rest.strip_suffix('W') {
			spans.week = weeks.parse().map_err(|_| invalid())?;
		} else {
			let (date, time) = match rest.split_once('T') {
				Some((_, "")) => return Err(invalid()),
				Some((date, time)) => (date, Some(time)),
				None => (rest, None),
			};

			if date.is_empty() && time.is_none() {
				return Err(invalid());
			}

			for (unit, value) in parse_section(date, &['Y', 'M', 'D']).ok_or_else(invalid)? {
				match unit {
					'Y' => spans.year = value,
					'M' => spans.month = value,
					_ => spans.day = value,
				}
			}

			if let Some(time) = time {
				for (unit, value) in parse_section(time, &['H', 'M', 'S']).ok_or_else(invalid)? {
					match unit {
						'H' => spans.hour = value,
						'M' => spans.minute = value,
						_ => spans.second = value,
					}
				}
			}
		}

		if spans.is_empty() {
			return Err(DurationError::Empty(input.to_string()));
		}

		Ok(Self {
			spans,
		})
	}
}

/// Splits `1Y2M` into `[('Y', 1), ('M', 2)]`. Units must appear at most
/// once and in the order given.
fn parse_section(section: &str, units: &[char]) -> Option<Vec<(char, u32)>> {
	let mut result = Vec::new();
	let mut digits = String::new();
	let mut next_unit = 0;

	for c in section.chars() {
		if c.is_ascii_digit() {
			digits.push(c);
			continue;
		}

		let position = units.iter().position(|u| *u == c)?;
		if position < next_unit || digits.is_empty() {
			return None;
		}
		result.push((c, digits.parse().ok()?));
		digits.clear();
		next_unit = position + 1;
	}

	if !digits.is_empty() {
		return None;
	}
	Some(result)
}

impl TryFrom<String> for Duration {
	type Error = DurationError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Duration> for String {
	fn from(value: Duration) -> Self {
		value.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn duration(s: &str) -> Duration {
		s.parse().unwrap()
	}

	#[test]
	fn test_parse_single_units() {
		assert_eq!(
			duration("PT1S").spans(),
			Spans {
				second: 1,
				..Default::default()
			}
		);
		assert_eq!(
			duration("P3M").spans(),
			Spans {
				month: 3,
				..Default::default()
			}
		);
		assert_eq!(
			duration("P2W").spans(),
			Spans {
				week: 2,
				..Default::default()
			}
		);
	}

	#[test]
	fn test_parse_mixed_units() {
		let d = duration("P1Y2M3DT4H5M6S");
		assert_eq!(
			d.spans(),
			Spans {
				year: 1,
				month: 2,
				week: 0,
				day: 3,
				hour: 4,
				minute: 5,
				second: 6,
			}
		);
	}

	#[test]
	fn test_canonical_form() {
		for s in ["PT1S", "PT1M", "PT1H", "P1D", "P1W", "P1M", "P3M", "P1Y", "P1Y2M3DT4H5M6S", "P1DT12H"] {
			assert_eq!(duration(s).to_string(), s);
		}
	}

	#[test]
	fn test_minute_vs_month() {
		assert_eq!(duration("PT1M").spans().minute, 1);
		assert_eq!(duration("PT1M").spans().month, 0);
		assert_eq!(duration("P1M").spans().month, 1);
		assert_eq!(duration("P1M").spans().minute, 0);
	}

	#[test]
	fn test_reject_malformed() {
		for s in ["", "1D", "P", "PT", "P1", "PD", "P1D2", "P1M1Y", "PT1S1H", "P1W1D", "P1DT", "P1X"] {
			assert!(s.parse::<Duration>().is_err(), "{s} should not parse");
		}
	}

	#[test]
	fn test_reject_empty() {
		assert_eq!("P0D".parse::<Duration>(), Err(DurationError::Empty("P0D".to_string())));
		assert!(Duration::new(Spans::default()).is_err());
	}

	#[test]
	fn test_new_rejects_weeks_mixed_with_days() {
		let spans = Spans {
			week: 1,
			day: 1,
			..Default::default()
		};
		assert!(Duration::new(spans).is_err());
	}

	#[test]
	fn test_serde_as_string() {
		let d: Duration = serde_json::from_str("\"P1D\"").unwrap();
		assert_eq!(d, duration("P1D"));
		assert_eq!(serde_json::to_string(&d).unwrap(), "\"P1D\"");
		assert!(serde_json::from_str::<Duration>("\"nope\"").is_err());
	}
}
