//! Serde helpers for configuration fields.

use alloy::primitives::Address;
use serde::{Deserialize, Deserializer};

/// Parses a hex address case-insensitively.
///
/// Identities are lowercased before parsing so mixed-case input is accepted
/// without checksum validation; comparisons downstream are on the 20-byte
/// value.
pub fn parse_address(s: &str) -> Result<Address, String> {
	s.trim()
		.to_lowercase()
		.parse::<Address>()
		.map_err(|e| format!("invalid address `{}`: {}", s, e))
}

pub fn deserialize_address<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
	D: Deserializer<'de>,
{
	let s = String::deserialize(deserializer)?;
	parse_address(&s).map_err(serde::de::Error::custom)
}

pub fn deserialize_opt_address<'de, D>(deserializer: D) -> Result<Option<Address>, D::Error>
where
	D: Deserializer<'de>,
{
	let s = Option::<String>::deserialize(deserializer)?;
	match s {
		Some(s) => parse_address(&s).map(Some).map_err(serde::de::Error::custom),
		None => Ok(None),
	}
}
