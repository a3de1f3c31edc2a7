//! Requisition discovery.
//!
//! Fetches the publish and cancel event streams from the ledger,
//! normalizes raw logs into one requisition shape at the boundary, and
//! joins both streams into point-in-time snapshots. The full history is
//! refetched every cycle; correctness over efficiency.

pub mod events;
pub mod loader;

pub use events::RequisitionEventSource;
pub use loader::RequisitionLoader;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
	#[error("Event query failed: {0}")]
	Fetch(#[from] operator_ledger::LedgerError),
}
