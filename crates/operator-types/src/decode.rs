//! Tri-state decode result.
//!
//! Payload and event decoding must distinguish "not the supported order
//! type" from "actually broken data"; both are different from success, and
//! neither is a hard error.

use serde::{Deserialize, Serialize};

/// Outcome of decoding an opaque payload or event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodeOutcome<T> {
	/// The data matched the expected shape in full.
	Decoded(T),
	/// Well-formed data of some other kind; skipped silently downstream.
	NotApplicable,
	/// Data that should have matched but is broken.
	Malformed(String),
}

impl<T> DecodeOutcome<T> {
	pub fn decoded(&self) -> Option<&T> {
		match self {
			DecodeOutcome::Decoded(value) => Some(value),
			_ => None,
		}
	}

	pub fn into_decoded(self) -> Option<T> {
		match self {
			DecodeOutcome::Decoded(value) => Some(value),
			_ => None,
		}
	}

	pub fn is_decoded(&self) -> bool {
		matches!(self, DecodeOutcome::Decoded(_))
	}
}
