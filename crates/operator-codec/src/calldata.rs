//! Three-layer call codec for the supported order type.
//!
//! An order payload is an outer single-step batch call wrapping a
//! single-step pipe call addressed at the order-type contract, wrapping the
//! order-specific call. The decoder applies a layered fallback: any shape,
//! target or selector mismatch yields [`DecodeOutcome::NotApplicable`], and
//! a caller cannot tell which layer failed. Unsupported order types are
//! skipped, not treated as corrupt data.

use alloy::{
	primitives::{Address, Bytes, B256, U256},
	sol_types::SolCall,
};
use operator_types::{
	DecodeOutcome, OperatorParams, Requisition, SowOrder, AMOUNT_DECIMALS, RATIO_DECIMALS,
};

use crate::abi;
use crate::value::{from_fixed_point, from_signed_fixed_point};

/// Two-byte no-copy clipboard used for both wrapper layers.
const EMPTY_CLIPBOARD: [u8; 2] = [0u8; 2];

/// Product of encoding one sow order.
#[derive(Debug, Clone)]
pub struct EncodedSowBlueprint {
	/// The outer batch-call payload a blueprint carries.
	pub payload: Bytes,
	/// The innermost order-specific call, for inspection.
	pub inner_call: Bytes,
	/// Operator-paste markers; always empty in the current schema.
	pub operator_paste_instrs: Vec<B256>,
}

/// Encodes order parameters into the nested blueprint payload.
pub fn encode_sow_blueprint(order: &SowOrder, sow_blueprint: Address) -> EncodedSowBlueprint {
	let inner = abi::sowBlueprintv0Call {
		params: sow_order_to_abi(order),
	}
	.abi_encode();

	let pipe = abi::advancedPipeCall {
		pipes: vec![abi::AdvancedPipeCall {
			target: sow_blueprint,
			callData: inner.clone().into(),
			clipboard: Bytes::from(EMPTY_CLIPBOARD),
		}],
		value: U256::ZERO,
	}
	.abi_encode();

	let payload = abi::advancedFarmCall {
		data: vec![abi::AdvancedFarmCall {
			callData: pipe.into(),
			clipboard: Bytes::from(EMPTY_CLIPBOARD),
		}],
	}
	.abi_encode();

	EncodedSowBlueprint {
		payload: payload.into(),
		inner_call: inner.into(),
		operator_paste_instrs: Vec::new(),
	}
}

/// Attempts to decode a blueprint payload into order parameters.
///
/// Returns `Decoded` only on a full three-layer match against the expected
/// order-type contract; everything else is `NotApplicable`.
pub fn decode_sow_blueprint(payload: &[u8], sow_blueprint: Address) -> DecodeOutcome<SowOrder> {
	let farm = match abi::advancedFarmCall::abi_decode(payload) {
		Ok(call) => call,
		Err(_) => return DecodeOutcome::NotApplicable,
	};
	if farm.data.len() != 1 {
		return DecodeOutcome::NotApplicable;
	}

	let pipe_call = match abi::advancedPipeCall::abi_decode(&farm.data[0].callData) {
		Ok(call) => call,
		Err(_) => return DecodeOutcome::NotApplicable,
	};
	if pipe_call.pipes.len() != 1 {
		return DecodeOutcome::NotApplicable;
	}

	let step = &pipe_call.pipes[0];
	if step.target != sow_blueprint {
		return DecodeOutcome::NotApplicable;
	}

	match abi::sowBlueprintv0Call::abi_decode(&step.callData) {
		Ok(call) => DecodeOutcome::Decoded(sow_order_from_abi(call.params)),
		Err(_) => DecodeOutcome::NotApplicable,
	}
}

/// Encodes the execution entry-point call for a requisition, with empty
/// auxiliary operator data.
pub fn encode_tractor_call(requisition: &Requisition) -> Bytes {
	abi::tractorCall {
		requisition: abi::requisition_to_abi(requisition),
		operatorData: Bytes::new(),
	}
	.abi_encode()
	.into()
}

fn sow_order_to_abi(order: &SowOrder) -> abi::SowBlueprintData {
	abi::SowBlueprintData {
		sourceTokenIndices: order.source_token_indices.clone(),
		sowAmounts: abi::SowAmounts {
			totalAmountToSow: order.total_amount,
			minAmountToSowPerSeason: order.min_amount_per_season,
			maxAmountToSowPerSeason: order.max_amount_per_season,
		},
		minTemp: order.min_temperature,
		maxPodlineLength: order.max_podline_length,
		maxGrownStalkPerBdv: order.max_grown_stalk_per_bdv,
		runBlocksAfterSunrise: order.run_blocks_after_sunrise,
		slippageRatio: order.slippage_ratio,
		opParams: abi::OperatorParams {
			whitelistedOperators: order.operator_params.whitelist.clone(),
			tipAddress: order.operator_params.tip_address,
			operatorTipAmount: order.operator_params.tip_amount,
		},
	}
}

fn sow_order_from_abi(params: abi::SowBlueprintData) -> SowOrder {
	SowOrder {
		source_token_indices: params.sourceTokenIndices,
		total_amount: params.sowAmounts.totalAmountToSow,
		total_amount_display: from_fixed_point(params.sowAmounts.totalAmountToSow, AMOUNT_DECIMALS),
		min_amount_per_season: params.sowAmounts.minAmountToSowPerSeason,
		min_amount_per_season_display: from_fixed_point(
			params.sowAmounts.minAmountToSowPerSeason,
			AMOUNT_DECIMALS,
		),
		max_amount_per_season: params.sowAmounts.maxAmountToSowPerSeason,
		max_amount_per_season_display: from_fixed_point(
			params.sowAmounts.maxAmountToSowPerSeason,
			AMOUNT_DECIMALS,
		),
		min_temperature: params.minTemp,
		min_temperature_display: from_fixed_point(params.minTemp, AMOUNT_DECIMALS),
		max_podline_length: params.maxPodlineLength,
		max_podline_length_display: from_fixed_point(params.maxPodlineLength, AMOUNT_DECIMALS),
		max_grown_stalk_per_bdv: params.maxGrownStalkPerBdv,
		max_grown_stalk_per_bdv_display: from_fixed_point(
			params.maxGrownStalkPerBdv,
			AMOUNT_DECIMALS,
		),
		run_blocks_after_sunrise: params.runBlocksAfterSunrise,
		slippage_ratio: params.slippageRatio,
		slippage_ratio_display: from_fixed_point(params.slippageRatio, RATIO_DECIMALS),
		operator_params: OperatorParams {
			whitelist: params.opParams.whitelistedOperators.clone(),
			tip_address: params.opParams.tipAddress,
			tip_amount: params.opParams.operatorTipAmount,
			tip_amount_display: from_signed_fixed_point(
				params.opParams.operatorTipAmount,
				AMOUNT_DECIMALS,
			),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::I256;

	fn sow_blueprint_address() -> Address {
		Address::from([0xbb; 20])
	}

	fn sample_order() -> SowOrder {
		let total = U256::from(500_000_000u64);
		let min_season = U256::from(10_000_000u64);
		let max_season = U256::from(100_000_000u64);
		let min_temp = U256::from(25_500_000u64);
		let max_podline = U256::from(1_000_000_000_000u64);
		let max_grown_stalk = U256::from(3_250_000u64);
		let slippage = U256::from(10_000_000_000_000_000u64);
		let tip = I256::try_from(100_000_000i64).unwrap();
		SowOrder {
			source_token_indices: vec![0, 2],
			total_amount: total,
			total_amount_display: from_fixed_point(total, AMOUNT_DECIMALS),
			min_amount_per_season: min_season,
			min_amount_per_season_display: from_fixed_point(min_season, AMOUNT_DECIMALS),
			max_amount_per_season: max_season,
			max_amount_per_season_display: from_fixed_point(max_season, AMOUNT_DECIMALS),
			min_temperature: min_temp,
			min_temperature_display: from_fixed_point(min_temp, AMOUNT_DECIMALS),
			max_podline_length: max_podline,
			max_podline_length_display: from_fixed_point(max_podline, AMOUNT_DECIMALS),
			max_grown_stalk_per_bdv: max_grown_stalk,
			max_grown_stalk_per_bdv_display: from_fixed_point(max_grown_stalk, AMOUNT_DECIMALS),
			run_blocks_after_sunrise: U256::from(300u64),
			slippage_ratio: slippage,
			slippage_ratio_display: from_fixed_point(slippage, RATIO_DECIMALS),
			operator_params: OperatorParams {
				whitelist: vec![Address::from([0x11; 20])],
				tip_address: Address::from([0x22; 20]),
				tip_amount: tip,
				tip_amount_display: from_signed_fixed_point(tip, AMOUNT_DECIMALS),
			},
		}
	}

	#[test]
	fn test_encode_decode_round_trip() {
		let order = sample_order();
		let encoded = encode_sow_blueprint(&order, sow_blueprint_address());
		assert!(encoded.operator_paste_instrs.is_empty());
		assert!(!encoded.inner_call.is_empty());

		let decoded = decode_sow_blueprint(&encoded.payload, sow_blueprint_address());
		// Integer and display fields both reconstruct exactly.
		assert_eq!(decoded, DecodeOutcome::Decoded(order));
	}

	#[test]
	fn test_decode_display_fields() {
		let order = sample_order();
		let encoded = encode_sow_blueprint(&order, sow_blueprint_address());
		let decoded = decode_sow_blueprint(&encoded.payload, sow_blueprint_address());

		let decoded = decoded.decoded().expect("payload should decode");
		assert_eq!(decoded.total_amount_display, "500");
		assert_eq!(decoded.min_temperature_display, "25.5");
		assert_eq!(decoded.slippage_ratio_display, "0.01");
		assert_eq!(decoded.operator_params.tip_amount_display, "100");
	}

	#[test]
	fn test_decode_rejects_foreign_payloads() {
		let expected = sow_blueprint_address();

		// Empty and garbage payloads are not errors, just not applicable.
		assert_eq!(decode_sow_blueprint(&[], expected), DecodeOutcome::NotApplicable);
		assert_eq!(
			decode_sow_blueprint(&[0xde, 0xad, 0xbe, 0xef], expected),
			DecodeOutcome::NotApplicable
		);

		// A well-formed call to some other function entirely.
		let other = encode_tractor_call(&Requisition {
			blueprint: operator_types::Blueprint {
				publisher: Address::ZERO,
				data: Bytes::new(),
				operator_paste_instrs: vec![],
				max_nonce: U256::from(1),
				start_time: 0,
				end_time: 1,
			},
			blueprint_hash: B256::ZERO,
			signature: Bytes::new(),
		});
		assert_eq!(decode_sow_blueprint(&other, expected), DecodeOutcome::NotApplicable);
	}

	#[test]
	fn test_decode_rejects_mismatched_target() {
		let order = sample_order();
		let encoded = encode_sow_blueprint(&order, sow_blueprint_address());

		// Indistinguishable from a payload that fails to parse at all.
		let other_target = Address::from([0xcc; 20]);
		assert_eq!(
			decode_sow_blueprint(&encoded.payload, other_target),
			DecodeOutcome::NotApplicable
		);
	}

	#[test]
	fn test_decode_rejects_wrong_inner_selector() {
		// A pipe step addressed at the right target but carrying some other
		// function call.
		let inner = abi::advancedFarmCall { data: vec![] }.abi_encode();
		let pipe = abi::advancedPipeCall {
			pipes: vec![abi::AdvancedPipeCall {
				target: sow_blueprint_address(),
				callData: inner.into(),
				clipboard: Bytes::from(EMPTY_CLIPBOARD),
			}],
			value: U256::ZERO,
		}
		.abi_encode();
		let payload = abi::advancedFarmCall {
			data: vec![abi::AdvancedFarmCall {
				callData: pipe.into(),
				clipboard: Bytes::from(EMPTY_CLIPBOARD),
			}],
		}
		.abi_encode();

		assert_eq!(
			decode_sow_blueprint(&payload, sow_blueprint_address()),
			DecodeOutcome::NotApplicable
		);
	}

	#[test]
	fn test_decode_ignores_clipboard_contents() {
		let order = sample_order();
		let inner = abi::sowBlueprintv0Call {
			params: super::sow_order_to_abi(&order),
		}
		.abi_encode();
		let pipe = abi::advancedPipeCall {
			pipes: vec![abi::AdvancedPipeCall {
				target: sow_blueprint_address(),
				callData: inner.into(),
				clipboard: Bytes::from(vec![1, 2, 3, 4]),
			}],
			value: U256::ZERO,
		}
		.abi_encode();
		let payload = abi::advancedFarmCall {
			data: vec![abi::AdvancedFarmCall {
				callData: pipe.into(),
				clipboard: Bytes::from(vec![9, 9]),
			}],
		}
		.abi_encode();

		assert_eq!(
			decode_sow_blueprint(&payload, sow_blueprint_address()),
			DecodeOutcome::Decoded(order)
		);
	}

	#[test]
	fn test_tractor_call_selector() {
		let requisition = Requisition {
			blueprint: operator_types::Blueprint {
				publisher: Address::from([0x33; 20]),
				data: Bytes::from(vec![1, 2, 3]),
				operator_paste_instrs: vec![],
				max_nonce: U256::from(1),
				start_time: 10,
				end_time: 20,
			},
			blueprint_hash: B256::from([0x44; 32]),
			signature: Bytes::from(vec![5; 65]),
		};
		let calldata = encode_tractor_call(&requisition);
		assert_eq!(calldata[..4], abi::tractorCall::SELECTOR);
	}
}
