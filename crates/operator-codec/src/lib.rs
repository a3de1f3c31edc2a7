//! Codecs for the requisition pipeline.
//!
//! Two pure transformations live here: the value codec between
//! human-decimal strings and fixed-point integers, and the three-layer
//! call codec for the one supported order payload. Neither performs I/O.

pub mod abi;
pub mod calldata;
pub mod value;

pub use calldata::*;
pub use value::*;
