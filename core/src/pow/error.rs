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

//! Cuckoo Cycle mining errors. Verification failures are not represented
//! here - they are returned as `VerifyResult` values, not errors, since a
//! failed verification is an expected, non-exceptional outcome.

use failure::{Backtrace, Context, Fail};
use std::fmt::{self, Display};
use std::io;

/// A mining-side error: bad parameters or a forest path that grew past
/// `MAXPATHLEN`.
#[derive(Debug)]
pub struct Error {
	inner: Context<ErrorKind>,
}

#[derive(Clone, Debug, Eq, Fail, PartialEq)]
/// Cuckoo Cycle error kinds
pub enum ErrorKind {
	/// `nodes_bits` outside `[1, 32]`
	#[fail(display = "nodes_bits {} out of range [1, 32]", _0)]
	InvalidNodesBits(u8),
	/// `edges_ratio` outside `[0, 100]`
	#[fail(display = "edges_ratio {} out of range [0, 100]", _0)]
	InvalidEdgesRatio(u8),
	/// `proof_size` is zero or odd
	#[fail(display = "proof_size {} must be even and at least 2", _0)]
	InvalidProofSize(u8),
	/// A forest path exceeded `MAXPATHLEN` nodes during traversal
	#[fail(display = "maximum path length exceeded")]
	PathOverflow,
	/// IO error while deriving siphash keys
	#[fail(display = "IO error deriving siphash keys")]
	IOError,
}

impl Fail for Error {
	fn cause(&self) -> Option<&dyn Fail> {
		self.inner.cause()
	}

	fn backtrace(&self) -> Option<&Backtrace> {
		self.inner.backtrace()
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		Display::fmt(&self.inner, f)
	}
}

impl Error {
	/// Return the kind of this error
	pub fn kind(&self) -> ErrorKind {
		self.inner.get_context().clone()
	}
}

impl From<ErrorKind> for Error {
	fn from(kind: ErrorKind) -> Error {
		Error {
			inner: Context::new(kind),
		}
	}
}

impl From<Context<ErrorKind>> for Error {
	fn from(inner: Context<ErrorKind>) -> Error {
		Error { inner }
	}
}

impl From<io::Error> for Error {
	fn from(_error: io::Error) -> Error {
		Error {
			inner: Context::new(ErrorKind::IOError),
		}
	}
}
