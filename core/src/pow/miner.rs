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

//! Tromp's basic Cuckoo Cycle miner: single-threaded, deterministic, and
//! memory-hard by virtue of the `cuckoo` forest array being the dominant
//! allocation. Not optimized for speed - this is the reference algorithm,
//! not Tromp's much faster "Tomato" miner.

use std::cmp;
use std::collections::HashSet;

use crate::pow::error::{Error, ErrorKind};
use crate::pow::graph::GraphParams;
use crate::pow::keys::SipKeys;

/// Cap on forest-path depth; exceeding it during traversal is a fatal
/// parameter error (the original C++ implementation aborts the process -
/// here it's surfaced as `ErrorKind::PathOverflow`).
const MAXPATHLEN: usize = 8192;

/// An unordered edge, used to track which edges make up the closed cycle
/// while harvesting nonces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct Edge {
	u: u32,
	v: u32,
}

enum Joined {
	/// Roots matched and the resulting cycle has exactly `proof_size`
	/// edges: ready to harvest.
	Closed { nu: usize, nv: usize },
	/// Roots matched but the cycle is the wrong length: discard the edge.
	WrongLength,
	/// Roots did not match: attach one path as a subtree of the other.
	Disjoint,
}

/// Finds a length-`proof_size` cycle in the Cuckoo graph keyed by
/// `(block_hash, header_nonce)`, scanning up to `params.difficulty()` edge
/// nonces. Returns `None` if the search completes without finding one.
pub fn find_cycle(
	block_hash: &[u8; 32],
	header_nonce: u32,
	params: GraphParams,
) -> Result<Option<Vec<u32>>, Error> {
	let keys = SipKeys::derive(block_hash, header_nonce);
	let difficulty = params.difficulty();

	log::info!(
		"cuckoo: searching for a {}-cycle on cuckoo{} with {}% edges ({} candidates)",
		params.proof_size,
		params.nodes_bits,
		params.edges_ratio,
		difficulty,
	);

	// cuckoo[u] = v means the forest has a directed edge from node u toward
	// its root; index 0 is reserved as nil.
	let mut cuckoo = vec![0u32; 2 * params.nodes_count() as usize];
	let mut us = [0u32; MAXPATHLEN];
	let mut vs = [0u32; MAXPATHLEN];

	for nonce in 0..difficulty as u32 {
		let u0 = params.endpoint(&keys, nonce, 0);
		if u0 == 0 {
			continue; // reserve 0 as nil; v0 is guaranteed non-zero
		}
		let v0 = params.endpoint(&keys, nonce, 1);

		us[0] = u0;
		vs[0] = v0;
		let nu = path(&cuckoo, cuckoo[u0 as usize], &mut us)?;
		let nv = path(&cuckoo, cuckoo[v0 as usize], &mut vs)?;

		match join(&us, nu, &vs, nv, params.proof_size as usize) {
			Joined::Closed { nu, nv } => {
				let cycle = harvest(&keys, &params, &us, nu, &vs, nv);
				if cycle.len() == params.proof_size as usize {
					return Ok(Some(cycle));
				}
				log::debug!("cuckoo: harvest produced {} nonces, expected {}, continuing", cycle.len(), params.proof_size);
			}
			Joined::WrongLength => {
				log::debug!("cuckoo: closed a cycle of the wrong length at nonce {}, skipping", nonce);
			}
			Joined::Disjoint => {
				update_forest(&mut cuckoo, &us, nu, &vs, nv);
			}
		}
	}

	Ok(None)
}

/// Walks the forest from `u` to its root, recording the path in `path_buf`
/// starting at index 1 (index 0 already holds the edge's own endpoint).
/// Returns the path depth.
fn path(cuckoo: &[u32], mut u: u32, path_buf: &mut [u32; MAXPATHLEN]) -> Result<usize, Error> {
	let mut depth = 0usize;
	while u != 0 {
		depth += 1;
		if depth >= MAXPATHLEN {
			return Err(ErrorKind::PathOverflow.into());
		}
		path_buf[depth] = u;
		u = cuckoo[u as usize];
	}
	Ok(depth)
}

fn join(us: &[u32; MAXPATHLEN], mut nu: usize, vs: &[u32; MAXPATHLEN], mut nv: usize, proof_size: usize) -> Joined {
	if us[nu] != vs[nv] {
		return Joined::Disjoint;
	}
	let min = cmp::min(nu, nv);
	nu -= min;
	nv -= min;
	while us[nu] != vs[nv] {
		nu += 1;
		nv += 1;
	}
	if nu + nv + 1 == proof_size {
		Joined::Closed { nu, nv }
	} else {
		Joined::WrongLength
	}
}

/// Attaches the shorter of the two paths as a subtree of the longer, making
/// the new edge part of the forest.
fn update_forest(cuckoo: &mut [u32], us: &[u32; MAXPATHLEN], mut nu: usize, vs: &[u32; MAXPATHLEN], mut nv: usize) {
	if nu < nv {
		while nu != 0 {
			cuckoo[us[nu] as usize] = us[nu - 1];
			nu -= 1;
		}
		cuckoo[us[0] as usize] = vs[0];
	} else {
		while nv != 0 {
			cuckoo[vs[nv] as usize] = vs[nv - 1];
			nv -= 1;
		}
		cuckoo[vs[0] as usize] = us[0];
	}
}

/// Reconstructs the cycle's edge set from the two paths that just joined,
/// then rescans all candidate nonces to find which ones produced those
/// edges. Returns the nonces in ascending order.
fn harvest(
	keys: &SipKeys,
	params: &GraphParams,
	us: &[u32; MAXPATHLEN],
	mut nu: usize,
	vs: &[u32; MAXPATHLEN],
	mut nv: usize,
) -> Vec<u32> {
	let mut cycle_edges = HashSet::new();
	cycle_edges.insert(Edge { u: us[0], v: vs[0] });

	while nu != 0 {
		nu -= 1;
		// us is even-indexed at u positions, odd-indexed at v positions
		cycle_edges.insert(Edge {
			u: us[(nu + 1) & !1],
			v: us[nu | 1],
		});
	}
	while nv != 0 {
		nv -= 1;
		cycle_edges.insert(Edge {
			u: vs[nv | 1],
			v: vs[(nv + 1) & !1],
		});
	}

	let mut found = Vec::with_capacity(cycle_edges.len());
	for nonce in 0..params.difficulty() as u32 {
		let edge = Edge {
			u: params.endpoint(keys, nonce, 0),
			v: params.endpoint(keys, nonce, 1),
		};
		if cycle_edges.remove(&edge) {
			found.push(nonce);
		}
	}
	found.sort_unstable();
	found
}
