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

//! Consensus-critical core of a cryptocurrency node: Cuckoo Cycle
//! proof-of-work mining and verification (`pow`), and a BIP9-style
//! versionbits soft-fork activation state machine (`versionbits`). Neither
//! module touches networking, storage or chain state beyond the minimal
//! `BlockIndex` view `versionbits` needs - this crate is meant to be linked
//! into a full node, not to be one.

#[macro_use]
extern crate serde_derive;

pub mod pow;
pub mod versionbits;
