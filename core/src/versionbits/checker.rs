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

//! The abstract condition checker and its version-bit-signaling
//! implementation. The classic reference parameterizes the state machine
//! through virtual-method subclassing; the idiomatic replacement here is a
//! small trait, generic over the concrete `BlockIndex`.

use crate::versionbits::{BlockIndex, TOP_BITS, TOP_MASK};

/// Chain-wide parameters shared by every deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
	/// Length, in blocks, of one signaling window.
	pub period: i64,
	/// Blocks within `period` that must signal for a lock-in.
	pub threshold: i64,
}

/// One soft-fork's schedule and signaling bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
	/// Bit of `version`, in `[0, 28]`, used to signal this deployment.
	pub bit: u8,
	/// MTP at which the deployment's signaling window opens.
	pub start_time: i64,
	/// MTP after which, absent a lock-in, the deployment is failed.
	pub timeout: i64,
	/// Explicit activation height (0 disables block-height mode).
	pub begin_block: i64,
	/// Explicit height after which the deployment is failed (0 disables
	/// block-height mode).
	pub end_block: i64,
}

impl Deployment {
	/// A deployment with no explicit block-height window, signaling via
	/// `start_time`/`timeout` only.
	pub fn time_based(bit: u8, start_time: i64, timeout: i64) -> Deployment {
		Deployment {
			bit,
			start_time,
			timeout,
			begin_block: 0,
			end_block: 0,
		}
	}
}

/// Parameterizes the state machine: where a deployment's window sits in
/// time or height, and whether a given block signals for it.
pub trait ThresholdConditionChecker<B: BlockIndex> {
	/// The deployment this checker evaluates.
	fn deployment(&self) -> &Deployment;

	/// MTP at which signaling opens.
	fn begin_time(&self, _params: &Params) -> i64 {
		self.deployment().start_time
	}
	/// MTP after which an un-locked-in deployment fails.
	fn end_time(&self, _params: &Params) -> i64 {
		self.deployment().timeout
	}
	/// Explicit activation height, or 0 if this deployment uses the
	/// time-based branch.
	fn begin_block(&self, _params: &Params) -> i64 {
		self.deployment().begin_block
	}
	/// Explicit failure height, or 0 if this deployment uses the
	/// time-based branch.
	fn end_block(&self, _params: &Params) -> i64 {
		self.deployment().end_block
	}
	/// Whether `block` signals for this deployment.
	fn condition(&self, block: &B, params: &Params) -> bool;
}

/// The standard version-bit condition: the block's top three version bits
/// read `001` and its signaling bit is set.
#[derive(Debug, Clone, Copy)]
pub struct VersionBitsChecker {
	deployment: Deployment,
}

impl VersionBitsChecker {
	/// A checker for `deployment`.
	pub fn new(deployment: Deployment) -> VersionBitsChecker {
		VersionBitsChecker { deployment }
	}

	/// The bitmask for this deployment's signaling bit.
	pub fn mask(&self) -> u32 {
		1u32 << self.deployment.bit
	}
}

impl<B: BlockIndex> ThresholdConditionChecker<B> for VersionBitsChecker {
	fn deployment(&self) -> &Deployment {
		&self.deployment
	}

	fn condition(&self, block: &B, _params: &Params) -> bool {
		let version = block.version();
		(version & TOP_MASK) == TOP_BITS && (version & self.mask()) != 0
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn mask_matches_bit() {
		let checker = VersionBitsChecker::new(Deployment::time_based(5, 0, 0));
		assert_eq!(checker.mask(), 1 << 5);
	}
}
