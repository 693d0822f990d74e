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

//! Cuckoo Cycle, designed by John Tromp: a memory-hard proof-of-work built
//! around finding a fixed-length cycle in a bipartite graph whose edges are
//! a keyed pseudo-random function of the header hash and nonce. This module
//! is mining and verification only - difficulty adjustment, target
//! selection and header (de)serialization live outside this crate.

pub mod error;
pub mod graph;
pub mod keys;
mod miner;
mod siphash;
mod verifier;

pub use self::error::{Error, ErrorKind};
pub use self::graph::GraphParams;
pub use self::keys::SipKeys;
pub use self::verifier::VerifyResult;

/// Searches for a length-`proof_size` cycle on cuckoo-`nodes_bits`
/// keyed by `(block_hash, header_nonce)`, scanning `edges_ratio` percent of
/// the edge space. Returns the cycle's edge nonces in ascending order, or
/// `None` if the search completed without finding one.
pub fn find_cycle(
	block_hash: [u8; 32],
	header_nonce: u32,
	nodes_bits: u8,
	edges_ratio: u8,
	proof_size: u8,
) -> Result<Option<Vec<u32>>, Error> {
	let params = graph::GraphParams::new(nodes_bits, edges_ratio, proof_size)?;
	miner::find_cycle(&block_hash, header_nonce, params)
}

/// Verifies that `cycle` is a canonical, valid length-`proof_size` cycle in
/// the graph keyed by `(block_hash, header_nonce)`.
pub fn verify_cycle(
	block_hash: [u8; 32],
	header_nonce: u32,
	nodes_bits: u8,
	proof_size: u8,
	cycle: &[u32],
) -> VerifyResult {
	verifier::verify_cycle(&block_hash, header_nonce, nodes_bits, proof_size, cycle)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn entry_points_round_trip() {
		let mut cycle = None;
		for nonce in 0..200u32 {
			if let Ok(Some(c)) = find_cycle([3u8; 32], nonce, 12, 50, 6) {
				cycle = Some((nonce, c));
				break;
			}
		}
		let (nonce, cycle) = cycle.expect("expected to find a cycle within 200 header nonces");
		assert_eq!(verify_cycle([3u8; 32], nonce, 12, 6, &cycle), VerifyResult::Ok);
	}

	#[test]
	fn rejects_invalid_parameters() {
		assert!(find_cycle([0u8; 32], 0, 0, 50, 6).is_err());
		assert!(find_cycle([0u8; 32], 0, 12, 150, 6).is_err());
		assert!(find_cycle([0u8; 32], 0, 12, 50, 5).is_err());
	}
}
