pub mod alloy_ledger;
