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

//! SipHash-2-4 (2 compression rounds, 4 finalization rounds) keyed by a pair
//! of 64-bit words, as specified by Aumasson and Bernstein. The graph edge
//! generator in `graph::endpoint` is built on top of `siphash24`.

/// The four internal SipHash state words, expanded from the two-word key
/// `(k0, k1)` via the standard SipHash magic constants.
pub fn expand_key(k0: u64, k1: u64) -> [u64; 4] {
	[
		k0 ^ 0x736f_6d65_7073_6575,
		k1 ^ 0x646f_7261_6e64_6f6d,
		k0 ^ 0x6c79_6765_6e65_7261,
		k1 ^ 0x7465_6462_7974_6573,
	]
}

/// SipHash-2-4 over an 8-byte message `m`, keyed by the expanded state `v`.
pub fn siphash24(v: [u64; 4], m: u64) -> u64 {
	let mut v0 = v[0];
	let mut v1 = v[1];
	let mut v2 = v[2];
	let mut v3 = v[3] ^ m;

	macro_rules! rotl {
		($x:ident, $b:expr) => {
			$x = ($x << $b) | ($x >> (64 - $b));
		};
	}

	macro_rules! sipround {
		() => {
			v0 = v0.wrapping_add(v1);
			v2 = v2.wrapping_add(v3);
			rotl!(v1, 13);
			rotl!(v3, 16);
			v1 ^= v0;
			v3 ^= v2;
			rotl!(v0, 32);
			v2 = v2.wrapping_add(v1);
			v0 = v0.wrapping_add(v3);
			rotl!(v1, 17);
			rotl!(v3, 21);
			v1 ^= v2;
			v3 ^= v0;
			rotl!(v2, 32);
		};
	}

	// 2 compression rounds
	sipround!();
	sipround!();

	v0 ^= m;
	v2 ^= 0xff;

	// 4 finalization rounds
	sipround!();
	sipround!();
	sipround!();
	sipround!();

	v0 ^ v1 ^ v2 ^ v3
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn hash_some() {
		assert_eq!(siphash24([1, 2, 3, 4], 10), 928_382_149_599_306_901);
		assert_eq!(siphash24([1, 2, 3, 4], 111), 10_524_991_083_049_122_233);
		assert_eq!(siphash24([9, 7, 6, 7], 12), 1_305_683_875_471_634_734);
		assert_eq!(siphash24([9, 7, 6, 7], 10), 11_589_833_042_187_638_814);
	}

	#[test]
	fn expand_key_is_deterministic() {
		assert_eq!(expand_key(1, 2), expand_key(1, 2));
		assert_ne!(expand_key(1, 2), expand_key(2, 1));
	}
}
