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

//! Derives the two SipHash keys that seed a mining or verification session
//! from a block hash and a header nonce.

use blake2_rfc::blake2b::blake2b;
use byteorder::{ByteOrder, LittleEndian};

use crate::pow::siphash::expand_key;

/// The pair of 64-bit keys that seed one mining/verification session,
/// immutable for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SipKeys {
	pub k0: u64,
	pub k1: u64,
}

impl SipKeys {
	/// Derives `SipKeys` from a 32-byte block hash and a 32-bit header
	/// nonce: the nonce is spliced little-endian into the last 4 bytes of a
	/// copy of the hash, the result is Blake2b-32 hashed, and the first 16
	/// digest bytes are read back as two little-endian `u64`s.
	pub fn derive(block_hash: &[u8; 32], header_nonce: u32) -> SipKeys {
		let mut keyed = *block_hash;
		LittleEndian::write_u32(&mut keyed[28..32], header_nonce);

		let digest = blake2b(32, &[], &keyed);
		let bytes = digest.as_bytes();

		SipKeys {
			k0: LittleEndian::read_u64(&bytes[0..8]),
			k1: LittleEndian::read_u64(&bytes[8..16]),
		}
	}

	/// The four-word SipHash state expanded from `(k0, k1)`.
	pub fn expanded(&self) -> [u64; 4] {
		expand_key(self.k0, self.k1)
	}
}
