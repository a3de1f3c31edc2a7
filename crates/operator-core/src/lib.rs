//! Cycle orchestration and scheduling.
//!
//! One evaluation+execution cycle runs the full pipeline: fetch event
//! history, rebuild snapshots, filter to the executable set, fan out
//! per-candidate simulations, rank by estimated profit, and execute the
//! ranked list sequentially. Cycles never overlap; the next cycle starts a
//! fixed delay after the previous one completes, so a slow cycle pushes
//! back the next. An error inside a cycle is caught at the boundary and
//! means nothing executable this cycle.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::Address;
use futures::future::join_all;
use thiserror::Error;
use tracing::{info, warn};

use operator_discovery::{DiscoveryError, RequisitionEventSource, RequisitionLoader};
use operator_executor::{ExecutionRecord, ExecutionStatus, Executor};
use operator_order::{best, executable, rank, Candidate, Simulator};
use operator_types::RequisitionSnapshot;

#[derive(Debug, Error)]
pub enum CycleError {
	#[error("Discovery failed: {0}")]
	Discovery(#[from] DiscoveryError),
}

/// Summary of one cycle's decisions.
#[derive(Debug)]
pub struct CycleReport {
	/// Reference block the cycle evaluated against.
	pub block_number: u64,
	pub discovered: usize,
	pub undecoded: usize,
	pub cancelled: usize,
	pub executable: usize,
	pub simulation_failures: usize,
	pub executions: Vec<ExecutionRecord>,
}

impl CycleReport {
	/// Orders that reached a successful terminal state.
	pub fn executed(&self) -> usize {
		self.executions
			.iter()
			.filter(|record| {
				matches!(
					record.status,
					ExecutionStatus::Confirmed | ExecutionStatus::PreviewStopped
				)
			})
			.count()
	}
}

pub struct OperatorEngine {
	event_source: RequisitionEventSource,
	loader: RequisitionLoader,
	simulator: Simulator,
	executor: Executor,
	/// This operator's identity, matched against whitelists.
	operator: Address,
	publisher_filter: Option<Address>,
	poll_interval: Duration,
}

impl OperatorEngine {
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		event_source: RequisitionEventSource,
		loader: RequisitionLoader,
		simulator: Simulator,
		executor: Executor,
		operator: Address,
		publisher_filter: Option<Address>,
		poll_interval: Duration,
	) -> Self {
		Self {
			event_source,
			loader,
			simulator,
			executor,
			operator,
			publisher_filter,
			poll_interval,
		}
	}

	/// Drives cycles until shutdown.
	///
	/// The delay is measured from cycle completion, not cycle start, and
	/// there is no cancellation of an in-flight cycle.
	pub async fn run(&self) {
		info!(
			operator = %self.operator,
			interval_ms = self.poll_interval.as_millis() as u64,
			"Starting operator loop"
		);

		loop {
			match self.run_cycle().await {
				Ok(report) => {
					info!(
						block = report.block_number,
						discovered = report.discovered,
						executable = report.executable,
						executed = report.executed(),
						"Cycle complete"
					);
				}
				Err(e) => {
					warn!(error = %e, "Cycle failed; nothing executable this cycle");
				}
			}

			tokio::select! {
				_ = tokio::signal::ctrl_c() => {
					info!("Shutting down operator");
					break;
				}
				_ = tokio::time::sleep(self.poll_interval) => {}
			}
		}
	}

	/// Runs one evaluation+execution cycle.
	pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
		let head = self.event_source.latest_block().await?;
		let publishes = self.event_source.fetch_publishes(head.number).await?;
		let cancelled = self.event_source.fetch_cancelled_hashes(head.number).await?;

		let snapshots = self
			.loader
			.load(publishes, &cancelled, self.publisher_filter, false);

		let now_ms = now_ms();

		// Monitoring output: every requisition, including undecoded ones.
		for snapshot in &snapshots {
			info!(
				blueprint = %snapshot.blueprint_hash(),
				status = %snapshot.status(now_ms),
				decoded = snapshot.order.is_decoded(),
				block = snapshot.block_number,
				"Requisition"
			);
		}

		let discovered = snapshots.len();
		let undecoded = snapshots
			.iter()
			.filter(|snapshot| !snapshot.order.is_decoded())
			.count();
		let cancelled_count = snapshots.iter().filter(|snapshot| snapshot.cancelled).count();

		let eligible = executable(&snapshots, self.operator, now_ms);
		let eligible_count = eligible.len();

		// Fan out independent simulations, fan in ordered results. Each
		// candidate's outcome is isolated; no shared state between them.
		let outcomes = join_all(
			eligible
				.iter()
				.map(|snapshot| self.simulator.simulate(snapshot)),
		)
		.await;

		let mut simulation_failures = 0;
		let mut candidates = Vec::new();
		for (snapshot, outcome) in eligible.into_iter().zip(outcomes) {
			if outcome.success {
				match outcome.profit {
					Some(profit) if profit.is_sign_positive() && !profit.is_zero() => {
						info!(blueprint = %snapshot.blueprint_hash(), %profit, "Profitable candidate");
					}
					Some(profit) => {
						info!(blueprint = %snapshot.blueprint_hash(), %profit, "Unprofitable candidate");
					}
					None => {
						info!(blueprint = %snapshot.blueprint_hash(), "Candidate with unknown profit");
					}
				}
				candidates.push(Candidate {
					snapshot: snapshot.clone(),
					outcome,
				});
			} else {
				simulation_failures += 1;
				info!(
					blueprint = %snapshot.blueprint_hash(),
					reason = outcome.failure_reason.as_deref().unwrap_or("unknown"),
					"Simulation failed"
				);
			}
		}

		let ranked = rank(candidates);
		if let Some(top) = best(&ranked) {
			info!(blueprint = %top.snapshot.blueprint_hash(), "Top-ranked candidate");
		}

		let order_refs: Vec<&RequisitionSnapshot> =
			ranked.iter().map(|candidate| &candidate.snapshot).collect();
		let executions = self.executor.execute_all(&order_refs).await;

		Ok(CycleReport {
			block_number: head.number,
			discovered,
			undecoded,
			cancelled: cancelled_count,
			executable: eligible_count,
			simulation_failures,
			executions,
		})
	}
}

fn now_ms() -> u64 {
	std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.unwrap()
		.as_millis() as u64
}
