//! Solidity type definitions for the diamond contract wire format.
//!
//! These types match the on-chain ABI and must stay bit-exact; everything
//! else in the workspace works with the domain types from `operator-types`
//! and converts at this boundary.

use alloy::sol;

sol! {
	/// An order description as stored on-chain.
	struct Blueprint {
		address publisher;
		bytes data;
		bytes32[] operatorPasteInstrs;
		uint256 maxNonce;
		uint256 startTime;
		uint256 endTime;
	}

	/// A blueprint plus hash and publisher signature.
	struct Requisition {
		Blueprint blueprint;
		bytes32 blueprintHash;
		bytes signature;
	}

	/// Emitted when a requisition is published.
	event PublishRequisition(Requisition requisition);

	/// Emitted when a blueprint is cancelled by its publisher.
	event CancelBlueprint(bytes32 blueprintHash);

	/// Execution entry point for a requisition.
	function tractor(Requisition requisition, bytes operatorData) external payable;

	/// One step of the outer batch call.
	struct AdvancedFarmCall {
		bytes callData;
		bytes clipboard;
	}

	function advancedFarm(AdvancedFarmCall[] data) external payable;

	/// One step of the pipe call, addressed to an external target.
	struct AdvancedPipeCall {
		address target;
		bytes callData;
		bytes clipboard;
	}

	function advancedPipe(AdvancedPipeCall[] pipes, uint256 value) external payable;

	/// Amount bounds of a sow order.
	struct SowAmounts {
		uint256 totalAmountToSow;
		uint256 minAmountToSowPerSeason;
		uint256 maxAmountToSowPerSeason;
	}

	/// Operator whitelist and compensation.
	struct OperatorParams {
		address[] whitelistedOperators;
		address tipAddress;
		int256 operatorTipAmount;
	}

	/// Parameters of the one supported order type.
	struct SowBlueprintData {
		uint8[] sourceTokenIndices;
		SowAmounts sowAmounts;
		uint256 minTemp;
		uint256 maxPodlineLength;
		uint256 maxGrownStalkPerBdv;
		uint256 runBlocksAfterSunrise;
		uint256 slippageRatio;
		OperatorParams opParams;
	}

	function sowBlueprintv0(SowBlueprintData params) external;
}

/// Converts a domain requisition to its wire shape.
pub fn requisition_to_abi(requisition: &operator_types::Requisition) -> Requisition {
	let blueprint = &requisition.blueprint;
	Requisition {
		blueprint: Blueprint {
			publisher: blueprint.publisher,
			data: blueprint.data.clone(),
			operatorPasteInstrs: blueprint.operator_paste_instrs.clone(),
			maxNonce: blueprint.max_nonce,
			startTime: alloy::primitives::U256::from(blueprint.start_time),
			endTime: alloy::primitives::U256::from(blueprint.end_time),
		},
		blueprintHash: requisition.blueprint_hash,
		signature: requisition.signature.clone(),
	}
}

/// Converts a wire requisition to the domain shape.
///
/// Fails when the activation window does not fit a Unix-seconds `u64`;
/// callers treat that as a malformed event.
pub fn requisition_from_abi(
	requisition: Requisition,
) -> Result<operator_types::Requisition, String> {
	let blueprint = requisition.blueprint;
	let start_time = u64::try_from(blueprint.startTime)
		.map_err(|_| format!("start time out of range: {}", blueprint.startTime))?;
	let end_time = u64::try_from(blueprint.endTime)
		.map_err(|_| format!("end time out of range: {}", blueprint.endTime))?;
	Ok(operator_types::Requisition {
		blueprint: operator_types::Blueprint {
			publisher: blueprint.publisher,
			data: blueprint.data,
			operator_paste_instrs: blueprint.operatorPasteInstrs,
			max_nonce: blueprint.maxNonce,
			start_time,
			end_time,
		},
		blueprint_hash: requisition.blueprintHash,
		signature: requisition.signature,
	})
}
