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

//! The bipartite graph induced by a pair of SipHash keys: node-space size,
//! the edge/endpoint encoding, and the parameters derived from
//! `(nodes_bits, edges_ratio, proof_size)`.

use crate::pow::error::{Error, ErrorKind};
use crate::pow::keys::SipKeys;
use crate::pow::siphash::siphash24;

/// Computes one endpoint of edge `nonce`: `uorv` selects the U (0) or V (1)
/// side. `mask` is applied to the raw SipHash output before the partition
/// bit is folded in at the low position. Mirrors the explicit-mask
/// `sipnode(hasher, mask, nonce, uorv)` shape used by both the miner (via
/// `GraphParams::sipnode_mask`) and the verifier, which must pass the same
/// mask to agree on where an edge's endpoints land.
pub fn endpoint(keys: &SipKeys, mask: u32, nonce: u32, uorv: u32) -> u32 {
	let hash = siphash24(keys.expanded(), 2 * nonce as u64 + uorv as u64);
	(((hash as u32) & mask) << 1) | uorv
}

/// Parameters for one mining or verification session, plus the quantities
/// derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphParams {
	/// log2 of the per-partition node-space size, in `[1, 32]`.
	pub nodes_bits: u8,
	/// Percent of the edge space to scan, in `[0, 100]`.
	pub edges_ratio: u8,
	/// Required cycle length: even, at least 2.
	pub proof_size: u8,
}

impl GraphParams {
	/// Validates the parameters and computes the derived quantities.
	pub fn new(nodes_bits: u8, edges_ratio: u8, proof_size: u8) -> Result<GraphParams, Error> {
		if nodes_bits < 1 || nodes_bits > 32 {
			return Err(ErrorKind::InvalidNodesBits(nodes_bits).into());
		}
		if edges_ratio > 100 {
			return Err(ErrorKind::InvalidEdgesRatio(edges_ratio).into());
		}
		if proof_size < 2 || proof_size % 2 != 0 {
			return Err(ErrorKind::InvalidProofSize(proof_size).into());
		}
		Ok(GraphParams {
			nodes_bits,
			edges_ratio,
			proof_size,
		})
	}

	/// Nodes per partition: `1 << (nodes_bits - 1)`.
	pub fn nodes_count(&self) -> u32 {
		1u32 << (self.nodes_bits - 1)
	}

	/// Upper bound on a valid edge nonce: `nodes_count - 1`. This is the
	/// bound a cycle's nonces are checked against (the verifier's `TooBig`
	/// check), not the mask fed into `sipnode` itself - see
	/// `sipnode_mask`.
	pub fn edge_mask(&self) -> u32 {
		self.nodes_count() - 1
	}

	/// Mask applied to the raw SipHash output before the endpoint is
	/// encoded: half of `edge_mask`, since the partition bit folded in by
	/// `endpoint` already accounts for the other half of the node space.
	/// Matches the verifier's own `sipnode_mask` exactly; the two have to
	/// agree or mining and verification compute different endpoints for
	/// the same nonce.
	pub fn sipnode_mask(&self) -> u32 {
		self.edge_mask() >> 1
	}

	/// Number of candidate edge nonces examined by the miner.
	pub fn difficulty(&self) -> u64 {
		self.edges_ratio as u64 * self.nodes_count() as u64 / 100
	}

	/// Computes endpoint `uorv` of edge `nonce` using this session's
	/// sipnode mask.
	pub fn endpoint(&self, keys: &SipKeys, nonce: u32, uorv: u32) -> u32 {
		endpoint(keys, self.sipnode_mask(), nonce, uorv)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn rejects_bad_nodes_bits() {
		assert!(GraphParams::new(0, 50, 4).is_err());
		assert!(GraphParams::new(33, 50, 4).is_err());
	}

	#[test]
	fn rejects_bad_edges_ratio() {
		assert!(GraphParams::new(10, 101, 4).is_err());
		assert!(GraphParams::new(10, 100, 4).is_ok());
	}

	#[test]
	fn rejects_bad_proof_size() {
		assert!(GraphParams::new(10, 50, 1).is_err());
		assert!(GraphParams::new(10, 50, 3).is_err());
		assert!(GraphParams::new(10, 50, 2).is_ok());
	}

	#[test]
	fn derived_quantities() {
		let p = GraphParams::new(6, 50, 4).unwrap();
		assert_eq!(p.nodes_count(), 32);
		assert_eq!(p.edge_mask(), 31);
		assert_eq!(p.sipnode_mask(), 15);
		assert_eq!(p.difficulty(), 16);
	}

	#[test]
	fn endpoints_have_expected_partition_bit() {
		let keys = SipKeys::derive(&[1u8; 32], 0);
		let p = GraphParams::new(10, 50, 4).unwrap();
		for nonce in 0..20u32 {
			let u = p.endpoint(&keys, nonce, 0);
			let v = p.endpoint(&keys, nonce, 1);
			assert_eq!(u & 1, 0);
			assert_eq!(v & 1, 1);
		}
	}
}
