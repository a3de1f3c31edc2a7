pub mod decode;
pub mod ledger;
pub mod mode;
pub mod requisition;
pub mod simulation;

pub use decode::*;
pub use ledger::*;
pub use mode::*;
pub use requisition::*;
pub use simulation::*;
