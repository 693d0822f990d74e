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

//! Memoization for `get_state_for`, one `ThresholdCache` per deployment.
//! Guarded by a `Mutex` so a single deployment's cache can be shared and
//! updated from several validation threads without the caller having to
//! hold a chain-wide lock just to read a cached state.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::versionbits::{BlockIndex, ThresholdState};

/// Identifies the block a cached state was computed for. `Root` stands in
/// for "the block before genesis" (a `None` parent), which the classic
/// implementation keys by a null pointer; `Height` keys by the block's
/// height, which is a stable identity for a single chain's ancestry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKey {
	/// The parent of the genesis block.
	Root,
	/// A block at a given height on the chain being validated.
	Height(i64),
}

impl BlockKey {
	/// Key for the block before genesis.
	pub fn genesis() -> BlockKey {
		BlockKey::Root
	}

	/// Key for `block`.
	pub fn of<B: BlockIndex>(block: &B) -> BlockKey {
		BlockKey::Height(block.height())
	}
}

/// Per-deployment memoization of state computed at period boundaries.
/// Entries are additive and monotone for a given ancestry: once a boundary
/// is cached, its value never changes for that chain.
#[derive(Default)]
pub struct ThresholdCache {
	entries: Mutex<HashMap<BlockKey, ThresholdState>>,
}

impl ThresholdCache {
	/// An empty cache.
	pub fn new() -> ThresholdCache {
		ThresholdCache {
			entries: Mutex::new(HashMap::new()),
		}
	}

	/// Looks up the cached state for `key`, if any.
	pub fn get(&self, key: &BlockKey) -> Option<ThresholdState> {
		self.entries.lock().unwrap().get(key).copied()
	}

	/// Memoizes `state` for `key`.
	pub fn insert(&self, key: BlockKey, state: ThresholdState) {
		self.entries.lock().unwrap().insert(key, state);
	}

	/// Drops every memoized entry.
	pub fn clear(&self) {
		self.entries.lock().unwrap().clear();
	}
}
