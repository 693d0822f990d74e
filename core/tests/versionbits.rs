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

//! Drives the versionbits state machine over a chain held as a flat vector
//! rather than the unit tests' linked-list mock, to exercise `BlockIndex`
//! against a second, independent implementation.

use tromp_core::versionbits::{
	get_state_for, get_statistics_for, BlockIndex, Deployment, Params, ThresholdCache,
	ThresholdState, VersionBitsChecker, VersionbitsCaches,
};

const TOP_BITS: u32 = 0x2000_0000;

#[derive(Clone)]
struct VecChain<'a> {
	blocks: &'a [(u32, i64)],
	height: i64,
}

impl<'a> VecChain<'a> {
	fn tip(blocks: &'a [(u32, i64)]) -> VecChain<'a> {
		VecChain {
			blocks,
			height: blocks.len() as i64 - 1,
		}
	}
}

impl<'a> BlockIndex for VecChain<'a> {
	fn height(&self) -> i64 {
		self.height
	}

	fn version(&self) -> u32 {
		self.blocks[self.height as usize].0
	}

	fn median_time_past(&self) -> i64 {
		self.blocks[self.height as usize].1
	}

	fn parent(&self) -> Option<VecChain<'a>> {
		self.ancestor(self.height - 1)
	}

	fn ancestor(&self, height: i64) -> Option<VecChain<'a>> {
		if height < 0 || height > self.height {
			return None;
		}
		Some(VecChain {
			blocks: self.blocks,
			height,
		})
	}
}

const SECS_PER_BLOCK: i64 = 600;

/// A chain where every block signals `signal_bit` and the median time past
/// advances a realistic ten minutes per block from `start_time`.
fn build_chain(len: usize, signal_bit: u32, start_time: i64) -> Vec<(u32, i64)> {
	(0..len)
		.map(|h| (TOP_BITS | (1 << signal_bit), start_time + h as i64 * SECS_PER_BLOCK))
		.collect()
}

#[test]
fn two_independent_deployments_activate_on_separate_schedules() {
	tromp_util::logger::init_logger(None);
	let mut caches = VersionbitsCaches::default();
	let params = Params { period: 144, threshold: 108 };

	// Every block signals bit 0, never bit 1.
	let blocks = build_chain(144 * 3, 0, 1_000);
	let chain = VecChain::tip(&blocks);

	// Deployment "a" signals on bit 0 throughout and has a timeout far in
	// the future: three periods of unanimous signaling carries it all the
	// way to Active.
	let checker_a = VersionBitsChecker::new(Deployment::time_based(0, 1_000, 1_000 + 144 * 1_000 * SECS_PER_BLOCK));
	let state_a = get_state_for(Some(&chain), &params, &checker_a, caches.cache("a"));
	assert_eq!(state_a, ThresholdState::Active);

	// Deployment "b" listens on bit 1, which this chain never sets, and
	// times out one period in: it fails at the second period boundary.
	let checker_b = VersionBitsChecker::new(Deployment::time_based(1, 1_000, 1_000 + 144 * SECS_PER_BLOCK));
	let state_b = get_state_for(Some(&chain), &params, &checker_b, caches.cache("b"));
	assert_eq!(state_b, ThresholdState::Failed);

	// Each deployment's cache is independent: clearing one doesn't disturb
	// the other's memoized entries.
	caches.cache("a").clear();
	assert_eq!(
		get_state_for(Some(&chain), &params, &checker_a, caches.cache("a")),
		ThresholdState::Active
	);
}

#[test]
fn statistics_track_a_still_open_period() {
	let params = Params { period: 144, threshold: 108 };
	let checker = VersionBitsChecker::new(Deployment::time_based(0, 1_000, 1_000 + 144 * 10));

	// One full period plus 20 blocks into the next, signaling every other
	// block in that partial period.
	let mut blocks = build_chain(144, 0, 1_000);
	for h in 144..144 + 20 {
		let version = if h % 2 == 0 { TOP_BITS | 1 } else { TOP_BITS };
		blocks.push((version, 1_000));
	}
	let chain = VecChain::tip(&blocks);

	let stats = get_statistics_for(Some(&chain), &params, &checker);
	assert_eq!(stats.elapsed, 20);
	assert_eq!(stats.count, 10);
	assert!(stats.possible);
}

#[test]
fn block_height_window_is_independent_of_time_based_deployments() {
	let params = Params { period: 144, threshold: 108 };
	let deployment = Deployment {
		bit: 0,
		start_time: 0,
		timeout: 0,
		begin_block: 50,
		end_block: 60,
	};
	let checker = VersionBitsChecker::new(deployment);
	let cache = ThresholdCache::new();

	let blocks = build_chain(50, 0, 0);
	let chain = VecChain::tip(&blocks);
	assert_eq!(chain.height(), 49);
	// Evaluating the block at height 50: inside [50, 60), not yet signaling.
	assert_eq!(
		get_state_for(Some(&chain), &params, &checker, &cache),
		ThresholdState::Started
	);
}
