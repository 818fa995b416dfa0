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

//! The persistent-container contract. An implementor of `NodeStore` is a
//! hierarchical node store: named groups, append-only typed arrays sized to
//! the narrowest integer width that fits their universe, variable-length
//! arrays of scalar vectors, and small named attributes. The engine and
//! driver depend only on this trait; no code outside `crate::implementation`
//! assumes a particular backend.

use crate::error::Result;
use crate::sizing::IntWidth;

/// A hierarchical, append-mostly node store.
///
/// No operation in this trait supports deleting or reordering previously
/// written elements; the one exception the engine relies on is updating the
/// `nested` attribute of an already-appended bicluster, which goes through
/// `set_attribute` rather than the array APIs.
pub trait NodeStore {
    /// Creates a group named `name` under `parent` (an empty `parent` means
    /// the root). Idempotent: creating a group that already exists is not an
    /// error.
    fn create_group(&mut self, parent: &str, name: &str) -> Result<()>;

    /// True iff a group or array has been created at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Creates an append-only array of fixed-width unsigned integers at
    /// `path`. `width` is chosen by the writer via `crate::sizing` to be the
    /// narrowest representation that fits the values' universe.
    fn create_fixed_array(&mut self, path: &str, width: IntWidth) -> Result<()>;

    /// Appends one value to the fixed-width array at `path`.
    fn append_fixed(&mut self, path: &str, value: u64) -> Result<()>;

    /// Reads back the full contents of the fixed-width array at `path`.
    fn read_fixed(&self, path: &str) -> Result<&[u64]>;

    /// Creates a variable-length array at `path`, each of whose elements is
    /// itself a vector of unsigned integers (used for bit-set words and
    /// ordered condition sequences, whose per-row length varies).
    fn create_varlen_array(&mut self, path: &str) -> Result<()>;

    /// Appends one row to the variable-length array at `path`.
    fn append_varlen(&mut self, path: &str, values: Vec<u64>) -> Result<()>;

    /// Reads back row `row` of the variable-length array at `path`.
    fn read_varlen(&self, path: &str, row: usize) -> Result<&[u64]>;

    /// Number of rows written to the variable-length array at `path`.
    fn varlen_len(&self, path: &str) -> Result<usize>;

    /// Sets a named attribute on the node at `path` to the given short
    /// vector of signed integers. Overwrites any prior value — this is the
    /// one place the contract permits in-place rewrite (used for the
    /// `nested` flag).
    fn set_attribute(&mut self, path: &str, key: &str, value: Vec<i64>) -> Result<()>;

    /// Reads a named attribute, or `None` if it was never set.
    fn get_attribute(&self, path: &str, key: &str) -> Result<Option<&[i64]>>;

    /// Commits any buffered state. A no-op beyond bookkeeping for an
    /// in-memory backend; required before a reader on a different handle can
    /// observe what was written.
    fn flush(&mut self) -> Result<()>;
}
