//! Operator identity.
//!
//! A single local private key holds the operator identity. The address it
//! derives is what requisition whitelists are matched against, and the
//! signer is handed to the ledger provider for transaction signing.

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountError {
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

/// Local wallet holding the one operator credential.
pub struct LocalWallet {
	signer: PrivateKeySigner,
}

impl LocalWallet {
	/// Creates a wallet from a hex-encoded private key, with or without a
	/// `0x` prefix.
	pub fn new(private_key_hex: &str) -> Result<Self, AccountError> {
		let signer = private_key_hex
			.parse::<PrivateKeySigner>()
			.map_err(|e| AccountError::InvalidKey(format!("Invalid private key: {}", e)))?;

		Ok(Self { signer })
	}

	/// The operator identity compared against order whitelists.
	pub fn address(&self) -> Address {
		self.signer.address()
	}

	/// The signer used by the ledger provider to authorize submissions.
	pub fn signer(&self) -> PrivateKeySigner {
		self.signer.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_wallet_derives_address() {
		// Well-known test vector key.
		let wallet = LocalWallet::new(
			"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
		)
		.expect("valid key");

		let expected: Address = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
			.parse()
			.unwrap();
		assert_eq!(wallet.address(), expected);
	}

	#[test]
	fn test_rejects_invalid_key() {
		assert!(LocalWallet::new("0x1234").is_err());
		assert!(LocalWallet::new("not a key").is_err());
	}
}
