//! Fixed-point value codec.
//!
//! Human-decimal strings exist for display and configuration input only;
//! all arithmetic and comparisons happen on the integer representation.
//! Formatting an integer and parsing the result back with the same
//! precision yields the same integer; trailing zeros are dropped on
//! display.

use alloy::primitives::{
	utils::{parse_units, ParseUnits},
	I256, U256,
};
use thiserror::Error;

/// Errors from parsing human-decimal amounts.
#[derive(Debug, Error)]
pub enum ValueError {
	#[error("invalid decimal amount `{amount}`: {reason}")]
	InvalidAmount { amount: String, reason: String },
	#[error("negative amount `{0}` not allowed here")]
	NegativeAmount(String),
}

/// Parses a non-negative human-decimal string into a fixed-point integer.
pub fn to_fixed_point(amount: &str, decimals: u8) -> Result<U256, ValueError> {
	match parse(amount, decimals)? {
		ParseUnits::U256(value) => Ok(value),
		ParseUnits::I256(_) => Err(ValueError::NegativeAmount(amount.to_string())),
	}
}

/// Parses a signed human-decimal string into a fixed-point integer.
pub fn to_signed_fixed_point(amount: &str, decimals: u8) -> Result<I256, ValueError> {
	match parse(amount, decimals)? {
		ParseUnits::U256(value) => I256::try_from(value).map_err(|e| ValueError::InvalidAmount {
			amount: amount.to_string(),
			reason: e.to_string(),
		}),
		ParseUnits::I256(value) => Ok(value),
	}
}

/// Formats a fixed-point integer as a human-decimal string.
pub fn from_fixed_point(amount: U256, decimals: u8) -> String {
	if decimals == 0 {
		return amount.to_string();
	}
	let base = U256::from(10u64).pow(U256::from(decimals));
	let whole = amount / base;
	let frac = amount % base;
	if frac.is_zero() {
		whole.to_string()
	} else {
		let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
		format!("{}.{}", whole, frac.trim_end_matches('0'))
	}
}

/// Formats a signed fixed-point integer as a human-decimal string.
pub fn from_signed_fixed_point(amount: I256, decimals: u8) -> String {
	if amount.is_negative() {
		format!("-{}", from_fixed_point(amount.unsigned_abs(), decimals))
	} else {
		from_fixed_point(amount.into_raw(), decimals)
	}
}

fn parse(amount: &str, decimals: u8) -> Result<ParseUnits, ValueError> {
	parse_units(amount, decimals).map_err(|e| ValueError::InvalidAmount {
		amount: amount.to_string(),
		reason: e.to_string(),
	})
}
