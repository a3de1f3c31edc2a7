//! Ranking and selection.

use std::cmp::Ordering;

use operator_types::{RequisitionSnapshot, SimulationOutcome};

/// An eligible, simulation-successful order with its estimated outcome.
#[derive(Debug, Clone)]
pub struct Candidate {
	pub snapshot: RequisitionSnapshot,
	pub outcome: SimulationOutcome,
}

/// Sorts candidates by descending estimated profit.
///
/// A candidate with a defined profit always ranks above one without; two
/// candidates that both lack a profit estimate keep their input order
/// (the sort is stable).
pub fn rank(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
	candidates.sort_by(|a, b| match (&a.outcome.profit, &b.outcome.profit) {
		(Some(a), Some(b)) => b.cmp(a),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	});
	candidates
}

/// The top-ranked candidate, for single-order callers.
pub fn best(ranked: &[Candidate]) -> Option<&Candidate> {
	ranked.first()
}
