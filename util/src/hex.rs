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

//! Hex encode/decode for the 32-byte hashes and SipHash keys the consensus
//! code passes around. Kept local rather than pulled from a crate since the
//! format needed is a single fixed-width lowercase encoding.

use std::fmt::Write;
use std::num;

/// Encode bytes into a lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
	let mut s = String::with_capacity(bytes.len() * 2);
	for byte in bytes {
		write!(&mut s, "{:02x}", byte).expect("string write is infallible");
	}
	s
}

/// Decode a hex string (with or without a leading "0x") into bytes.
pub fn from_hex(hex_str: &str) -> Result<Vec<u8>, num::ParseIntError> {
	let trimmed = hex_str.trim();
	let trimmed = if trimmed.len() >= 2 && &trimmed[..2] == "0x" {
		&trimmed[2..]
	} else {
		trimmed
	};
	(0..trimmed.len())
		.step_by(2)
		.map(|i| u8::from_str_radix(&trimmed[i..i + 2], 16))
		.collect()
}
