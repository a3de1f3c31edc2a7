//! Configuration for the operator process.
//!
//! Settings come from a TOML file with `${VAR}` environment substitution,
//! plus a small set of `OPERATOR_*` environment overrides. A missing or
//! invalid required setting is fatal at startup.

pub mod serde_helpers;
pub mod types;

mod loader;

pub use loader::{ConfigError, ConfigLoader};
pub use types::*;
