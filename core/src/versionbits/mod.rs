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

//! A BIP9-style finite-state-machine for deploying a soft fork in stages,
//! driven off block ancestry rather than an external scheduler. A block's
//! state is always the state of the first block of its period, so the
//! state machine only ever recomputes at period boundaries and memoizes
//! the result in a per-deployment cache keyed by block identity.

mod cache;
mod checker;

pub use self::cache::{BlockKey, ThresholdCache};
pub use self::checker::{Deployment, Params, ThresholdConditionChecker, VersionBitsChecker};

use std::collections::HashMap;

/// Top three bits of `version` that must read `001` for any of the
/// remaining 29 bits to carry deployment-signaling meaning.
pub const TOP_MASK: u32 = 0xE000_0000;
/// Required value of the top three bits.
pub const TOP_BITS: u32 = 0x2000_0000;

/// State of one soft-fork deployment. `Active` and `Failed` are terminal:
/// no outgoing transition exists from either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdState {
	/// Every deployment starts here; the genesis block is defined by
	/// definition.
	Defined,
	/// The deployment's signaling window has opened.
	Started,
	/// A period's tally met `threshold`; activates unconditionally at the
	/// next boundary.
	LockedIn,
	/// The deployment's rules are in effect.
	Active,
	/// The deployment timed out before locking in.
	Failed,
}

/// A read-only view onto one block's position in its chain, generic so
/// this crate never has to own a concrete block type. `height`, `version`
/// and `median_time_past` are properties of the block itself; `parent` and
/// `ancestor` navigate the chain it's part of.
pub trait BlockIndex: Sized + Clone {
	/// Height of this block (genesis is 0).
	fn height(&self) -> i64;
	/// The block header's 32-bit version field.
	fn version(&self) -> u32;
	/// Median of the timestamps of the preceding 11 blocks.
	fn median_time_past(&self) -> i64;
	/// This block's direct parent, or `None` at genesis.
	fn parent(&self) -> Option<Self>;
	/// The ancestor at `height`, or `None` if `height` is out of range.
	/// Implementations are expected to answer in O(log n).
	fn ancestor(&self, height: i64) -> Option<Self>;
}

/// Per-period statistics for a deployment still inside its current,
/// unfinished signaling period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bip9Stats {
	/// Length of the signaling window.
	pub period: i64,
	/// Blocks within `period` that must signal for the period to lock in.
	pub threshold: i64,
	/// Blocks elapsed since the end of the previous period.
	pub elapsed: i64,
	/// Blocks since the end of the previous period that signaled.
	pub count: i64,
	/// Whether the remaining blocks in the period can still reach
	/// `threshold`.
	pub possible: bool,
}

/// Computes the state of `deployment` for the block that would be built on
/// top of `parent` (i.e. at `parent.height() + 1`), consulting and
/// populating `cache` along the way.
///
/// `parent == None` means we're computing for the block that would follow
/// the genesis block.
pub fn get_state_for<B: BlockIndex>(
	parent: Option<&B>,
	params: &Params,
	checker: &dyn ThresholdConditionChecker<B>,
	cache: &ThresholdCache,
) -> ThresholdState {
	let deployment = checker.deployment();
	debug_assert!(params.period > 0);
	debug_assert!(params.threshold <= params.period);

	if deployment.begin_block != 0 && deployment.end_block != 0 {
		debug_assert!(deployment.end_block >= deployment.begin_block);
		return match parent {
			None => ThresholdState::Defined,
			Some(parent) => {
				let height = parent.height() + 1;
				if height >= deployment.begin_block && height < deployment.end_block {
					if checker.condition(parent, params) {
						ThresholdState::Started
					} else {
						ThresholdState::LockedIn
					}
				} else {
					ThresholdState::Failed
				}
			}
		};
	}

	// A block's state is the state of the first block of its period, so
	// align to a parent whose height is one less than a multiple of the
	// period.
	let mut parent = parent.and_then(|p| align_to_period_start(p, params.period));

	let mut to_compute = Vec::new();
	let mut state = loop {
		if let Some(p) = &parent {
			if let Some(cached) = cache.get(&BlockKey::of(p)) {
				break cached;
			}
			if p.median_time_past() < checker.begin_time(params) {
				cache.insert(BlockKey::of(p), ThresholdState::Defined);
				break ThresholdState::Defined;
			}
			to_compute.push(p.clone());
			parent = p.ancestor(p.height() - params.period);
		} else {
			cache.insert(BlockKey::genesis(), ThresholdState::Defined);
			break ThresholdState::Defined;
		}
	};

	while let Some(p) = to_compute.pop() {
		let mut next = state;
		match state {
			ThresholdState::Defined => {
				if p.median_time_past() >= checker.end_time(params) {
					next = ThresholdState::Failed;
				} else if p.median_time_past() >= checker.begin_time(params) {
					next = ThresholdState::Started;
				}
			}
			ThresholdState::Started => {
				if p.median_time_past() >= checker.end_time(params) {
					next = ThresholdState::Failed;
				} else {
					let count = count_signaling(&p, params, checker);
					if count >= params.threshold {
						next = ThresholdState::LockedIn;
					}
				}
			}
			ThresholdState::LockedIn => {
				next = ThresholdState::Active;
			}
			ThresholdState::Active | ThresholdState::Failed => {}
		}
		if next != state {
			log::debug!("versionbits: {:?} -> {:?} at height {}", state, next, p.height());
		}
		state = next;
		cache.insert(BlockKey::of(&p), state);
	}

	state
}

/// Counts, over the `period` blocks ending at (and including) `parent`,
/// how many satisfy `checker.condition`.
fn count_signaling<B: BlockIndex>(
	parent: &B,
	params: &Params,
	checker: &dyn ThresholdConditionChecker<B>,
) -> i64 {
	let mut count = 0;
	let mut current = parent.clone();
	for _ in 0..params.period {
		if checker.condition(&current, params) {
			count += 1;
		}
		match current.parent() {
			Some(p) => current = p,
			None => break,
		}
	}
	count
}

/// Returns the ancestor of `block` whose height is one less than a
/// multiple of `period` - the block whose state stands for its whole
/// period.
fn align_to_period_start<B: BlockIndex>(block: &B, period: i64) -> Option<B> {
	let target = block.height() - ((block.height() + 1) % period);
	block.ancestor(target)
}

/// Statistics for the current, still-open signaling period containing
/// `block_index`.
pub fn get_statistics_for<B: BlockIndex>(
	block_index: Option<&B>,
	params: &Params,
	checker: &dyn ThresholdConditionChecker<B>,
) -> Bip9Stats {
	let mut stats = Bip9Stats {
		period: params.period,
		threshold: params.threshold,
		..Bip9Stats::default()
	};

	let block_index = match block_index {
		Some(b) => b,
		None => return stats,
	};

	let end_of_prev_period = match align_to_period_start(block_index, params.period) {
		Some(b) => b,
		None => return stats,
	};
	stats.elapsed = block_index.height() - end_of_prev_period.height();

	let mut count = 0;
	let mut current = block_index.clone();
	while current.height() != end_of_prev_period.height() {
		if checker.condition(&current, params) {
			count += 1;
		}
		match current.parent() {
			Some(p) => current = p,
			None => break,
		}
	}
	stats.count = count;
	stats.possible = (stats.period - stats.threshold) >= (stats.elapsed - count);
	stats
}

/// Returns the height of the earliest ancestor at which `parent`'s current
/// state was entered. `0` if the current state is `Defined`.
pub fn get_state_since_height_for<B: BlockIndex>(
	parent: Option<&B>,
	params: &Params,
	checker: &dyn ThresholdConditionChecker<B>,
	cache: &ThresholdCache,
) -> i64 {
	let initial_state = get_state_for(parent, params, checker, cache);
	if initial_state == ThresholdState::Defined {
		return 0;
	}

	let mut aligned = match parent.and_then(|p| align_to_period_start(p, params.period)) {
		Some(a) => a,
		None => return 0,
	};

	loop {
		let prev = aligned.ancestor(aligned.height() - params.period);
		match prev {
			Some(p) if get_state_for(Some(&p), params, checker, cache) == initial_state => {
				aligned = p;
			}
			_ => break,
		}
	}

	aligned.height() + 1
}

/// The set of per-deployment caches for one chain. `clear` resets all of
/// them, e.g. when parameters change.
#[derive(Default)]
pub struct VersionbitsCaches {
	caches: HashMap<String, ThresholdCache>,
}

impl VersionbitsCaches {
	/// Returns (creating if necessary) the cache for `deployment_id`.
	pub fn cache(&mut self, deployment_id: &str) -> &ThresholdCache {
		self.caches
			.entry(deployment_id.to_owned())
			.or_insert_with(ThresholdCache::new)
	}

	/// Resets every deployment's cache.
	pub fn clear(&mut self) {
		for cache in self.caches.values() {
			cache.clear();
		}
	}
}

/// Returns the bitmask for a deployment's signaling bit.
pub fn versionbits_mask(deployment: &Deployment) -> u32 {
	1u32 << deployment.bit
}
