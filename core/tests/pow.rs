// Copyright 2026 Tromp Core Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end mining/verification across a handful of tiny cuckoo-size
//! configurations. These sizes are chosen so that a cycle turns up within a
//! bounded number of header nonces on every run; they are far too small to
//! mean anything about real network difficulty.

use tromp_core::pow::{find_cycle, verify_cycle, ErrorKind, VerifyResult};
use tromp_util::hex::to_hex;

fn mine_one(block_hash: [u8; 32], nodes_bits: u8, edges_ratio: u8, proof_size: u8) -> (u32, Vec<u32>) {
	for header_nonce in 0..2000u32 {
		if let Some(cycle) = find_cycle(block_hash, header_nonce, nodes_bits, edges_ratio, proof_size)
			.expect("valid parameters")
		{
			return (header_nonce, cycle);
		}
	}
	panic!("no cycle found within the nonce budget");
}

#[test]
fn mined_cycles_verify_across_sizes() {
	tromp_util::logger::init_logger(None);
	for &(nodes_bits, edges_ratio, proof_size) in &[(10u8, 50u8, 6u8), (12, 75, 8), (14, 100, 6)] {
		let block_hash = [nodes_bits; 32];
		let (header_nonce, cycle) = mine_one(block_hash, nodes_bits, edges_ratio, proof_size);
		assert_eq!(cycle.len(), proof_size as usize);
		assert_eq!(
			verify_cycle(block_hash, header_nonce, nodes_bits, proof_size, &cycle),
			VerifyResult::Ok,
			"mined cycle on header {} failed to verify for nodes_bits={}",
			to_hex(&block_hash),
			nodes_bits
		);
	}
}

#[test]
fn different_header_hash_rejects_the_cycle() {
	let block_hash = [7u8; 32];
	let (header_nonce, cycle) = mine_one(block_hash, 12, 50, 6);
	let other_hash = [8u8; 32];
	assert_ne!(
		verify_cycle(other_hash, header_nonce, 12, 6, &cycle),
		VerifyResult::Ok
	);
}

#[test]
fn mismatched_proof_size_is_rejected_before_touching_the_graph() {
	let block_hash = [9u8; 32];
	let (header_nonce, cycle) = mine_one(block_hash, 12, 50, 6);
	assert_eq!(
		verify_cycle(block_hash, header_nonce, 12, 6 + 2, &cycle),
		VerifyResult::ShortCycle
	);
}

#[test]
fn invalid_graph_parameters_surface_as_typed_errors() {
	assert_eq!(
		find_cycle([0u8; 32], 0, 0, 50, 6).unwrap_err().kind(),
		ErrorKind::InvalidNodesBits(0)
	);
	assert_eq!(
		find_cycle([0u8; 32], 0, 12, 150, 6).unwrap_err().kind(),
		ErrorKind::InvalidEdgesRatio(150)
	);
	assert_eq!(
		find_cycle([0u8; 32], 0, 12, 50, 5).unwrap_err().kind(),
		ErrorKind::InvalidProofSize(5)
	);
}
