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

//! Small set of helpers shared by every crate in the workspace: a logging
//! initializer for binaries and tests embedding `tromp_core`, and hex
//! encode/decode for the 32-byte hashes the consensus code passes around.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate serde_derive;

pub mod hex;
pub mod logger;
pub mod types;

pub use crate::types::{LogLevel, LoggingConfig};
