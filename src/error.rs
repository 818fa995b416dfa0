// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Error kinds shared by every layer of the engine, from `BitSet` algebra up
//! to the driver. See `DESIGN.md` / the specification's error handling
//! section for the propagation rules: `InvalidArgument` and
//! `PreconditionViolation` are programming bugs that bubble up to the
//! driver, `Corruption` aborts the process, `NotFound` is not actually an
//! error at the cache-lookup call site (it becomes an empty-count
//! sentinel), and `Cancelled` is observed cooperatively.

use crate::common::Width;

/// The crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building or querying a pool of
/// biclusters.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A universe mismatch between two set operands, an out-of-range member,
    /// a duplicate element in an ordered-set constructor, or an oversize
    /// dimension passed to the sizing helpers.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was attempted before a precondition it documents was
    /// satisfied: chaining against a width that has not been indexed since
    /// its last append, or chaining two ordered sets that do not share
    /// exactly the claimed link element.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// The persistent store holds a width group whose row arrays disagree
    /// in length, or whose bit-sets have non-zero bits past their universe.
    #[error("corrupted store at {0}")]
    Corruption(String),

    /// A query named a width for which no group has ever been created.
    #[error("no such width group: {0}")]
    NotFound(Width),

    /// A cooperative cancellation signal was observed at a chain-outer-loop
    /// boundary.
    #[error("cancelled")]
    Cancelled,
}
