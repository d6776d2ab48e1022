//! Network device addresses.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::{Error, Result};

static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(\d{1,3}\.){3}\d{1,3}:\d{1,5}$").expect("device address pattern is valid")
});

/// A `host:port` device address in dotted-quad form, e.g. `192.168.1.10:5555`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(String);

impl DeviceId {
	/// Validates the address shape.
	pub fn parse(candidate: &str) -> Result<Self> {
		if ADDRESS.is_match(candidate) {
			Ok(Self(candidate.to_string()))
		} else {
			Err(Error::invalid_input(format!("Invalid device address: {candidate}")))
		}
	}

	/// Drops duplicates and malformed candidates, keeping first-seen order.
	pub fn normalize<I, S>(candidates: I) -> Vec<DeviceId>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut seen = HashSet::new();
		candidates
			.into_iter()
			.filter_map(|c| DeviceId::parse(c.as_ref()).ok())
			.filter(|id| seen.insert(id.clone()))
			.collect()
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for DeviceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for DeviceId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl FromStr for DeviceId {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}
