//! Alloy-backed ledger implementation.
//!
//! Wraps an HTTP provider with a wallet filler so submissions are signed
//! with the operator key, and implements confirmation tracking by polling
//! receipts.

use alloy::eips::BlockId;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, FixedBytes};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{Filter, Log, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;

use operator_types::{BlockInfo, TransactionHash, TransactionReceipt};

use crate::{Ledger, LedgerError};

/// Truncates a transaction hash for display.
fn truncate_hash(hash: &TransactionHash) -> String {
	let hash_str = hex::encode(hash.0);
	if hash_str.len() <= 8 {
		hash_str
	} else {
		format!("{}..", &hash_str[..8])
	}
}

/// Keeps the first line of an error, capped for log output.
fn short_message(error: impl std::fmt::Display) -> String {
	let text = error.to_string();
	let line = text.lines().next().unwrap_or("").trim();
	if line.len() > 200 {
		format!("{}..", &line[..200])
	} else {
		line.to_string()
	}
}

pub struct AlloyLedger {
	provider: DynProvider,
}

impl AlloyLedger {
	/// Connects to an HTTP RPC endpoint with the operator signer attached.
	pub fn new(rpc_url: &str, signer: PrivateKeySigner) -> Result<Self, LedgerError> {
		let url = rpc_url
			.parse()
			.map_err(|e| LedgerError::Network(format!("Invalid RPC URL: {}", e)))?;

		let wallet = EthereumWallet::from(signer);
		let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

		Ok(Self {
			provider: provider.erased(),
		})
	}

	fn request(to: Address, data: Bytes) -> TransactionRequest {
		TransactionRequest::default().with_to(to).with_input(data)
	}
}

#[async_trait]
impl Ledger for AlloyLedger {
	async fn latest_block(&self) -> Result<BlockInfo, LedgerError> {
		let block = self
			.provider
			.get_block(BlockId::latest())
			.await
			.map_err(|e| LedgerError::Network(format!("Failed to get latest block: {}", e)))?
			.ok_or_else(|| LedgerError::Network("Latest block not available".to_string()))?;

		Ok(BlockInfo {
			number: block.header.number,
			timestamp: block.header.timestamp,
		})
	}

	async fn get_logs(&self, filter: &Filter) -> Result<Vec<Log>, LedgerError> {
		self.provider
			.get_logs(filter)
			.await
			.map_err(|e| LedgerError::Network(format!("Failed to get logs: {}", e)))
	}

	async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, LedgerError> {
		self.provider
			.call(Self::request(to, data))
			.await
			.map_err(|e| LedgerError::Execution(short_message(e)))
	}

	async fn estimate_gas(&self, to: Address, data: Bytes) -> Result<u64, LedgerError> {
		self.provider
			.estimate_gas(Self::request(to, data))
			.await
			.map_err(|e| LedgerError::Execution(short_message(e)))
	}

	async fn gas_price(&self) -> Result<u128, LedgerError> {
		self.provider
			.get_gas_price()
			.await
			.map_err(|e| LedgerError::Network(format!("Failed to get gas price: {}", e)))
	}

	async fn submit(&self, to: Address, data: Bytes) -> Result<TransactionHash, LedgerError> {
		let pending = self
			.provider
			.send_transaction(Self::request(to, data))
			.await
			.map_err(|e| LedgerError::Network(format!("Failed to send transaction: {}", e)))?;

		let tx_hash = *pending.tx_hash();
		tracing::info!(tx_hash = %truncate_hash(&tx_hash), "Submitted transaction");

		Ok(tx_hash)
	}

	async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
		confirmations: u64,
	) -> Result<TransactionReceipt, LedgerError> {
		let tx_hash = FixedBytes::<32>::from_slice(hash.as_slice());

		let poll_interval = tokio::time::Duration::from_secs(10);
		// Allow ~20 seconds per confirmation, capped at an hour.
		let seconds_per_confirmation = 20;
		let max_timeout = 3600;
		let timeout_seconds = (confirmations * seconds_per_confirmation)
			.max(seconds_per_confirmation)
			.min(max_timeout);
		let max_wait_time = tokio::time::Duration::from_secs(timeout_seconds);
		let start_time = tokio::time::Instant::now();

		tracing::info!(
			tx_hash = %truncate_hash(hash),
			"Waiting for {} confirmations (timeout: {}s)",
			confirmations,
			timeout_seconds
		);

		loop {
			if start_time.elapsed() > max_wait_time {
				return Err(LedgerError::Network(format!(
					"Timeout waiting for {} confirmations after {} seconds",
					confirmations,
					max_wait_time.as_secs()
				)));
			}

			let receipt = match self.provider.get_transaction_receipt(tx_hash).await {
				Ok(Some(receipt)) => receipt,
				Ok(None) => {
					// Not yet mined.
					tokio::time::sleep(poll_interval).await;
					continue;
				}
				Err(e) => {
					return Err(LedgerError::Network(format!(
						"Failed to get receipt: {}",
						e
					)));
				}
			};

			let current_block = self.provider.get_block_number().await.map_err(|e| {
				LedgerError::Network(format!("Failed to get block number: {}", e))
			})?;

			let tx_block = receipt.block_number.unwrap_or(0);
			let current_confirmations = current_block.saturating_sub(tx_block);

			if current_confirmations >= confirmations {
				return Ok(TransactionReceipt {
					hash: receipt.transaction_hash,
					block_number: tx_block,
					success: receipt.status(),
				});
			}

			tracing::debug!(
				"Waiting for {} more confirmations...",
				confirmations.saturating_sub(current_confirmations)
			);

			tokio::time::sleep(poll_interval).await;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_truncate_hash() {
		let hash = TransactionHash::from([0xabu8; 32]);
		assert_eq!(truncate_hash(&hash), "abababab..");
	}

	#[test]
	fn test_short_message_keeps_first_line() {
		let message = short_message("execution reverted: too hot\nbacktrace:\n  frame 1");
		assert_eq!(message, "execution reverted: too hot");
	}
}
