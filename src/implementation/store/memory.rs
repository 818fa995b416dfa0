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

//! A `Vec`-backed `NodeStore`. No file I/O; `flush` only exists to satisfy
//! the trait's bookkeeping contract. Exists so the engine and driver are
//! runnable and testable without an external dependency, and so the
//! persist/reload round-trip property can be exercised in tests.

use std::collections::HashMap;

use crate::abstraction::NodeStore;
use crate::error::{Error, Result};
use crate::sizing::IntWidth;

enum Node {
    Group,
    Fixed { width: IntWidth, values: Vec<u64> },
    Varlen { rows: Vec<Vec<u64>> },
}

/// An in-memory reference implementation of `NodeStore`, keyed by slash-
/// separated path strings the way the on-disk layout in SPEC_FULL.md §6
/// names them.
#[derive(Default)]
pub struct InMemoryStore {
    nodes: HashMap<String, Node, fxhash::FxBuildHasher>,
    attributes: HashMap<(String, String), Vec<i64>, fxhash::FxBuildHasher>,
    flushes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `flush` has been called; exposed for tests that want
    /// to assert the driver actually flushes between passes.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    fn fixed_mut(&mut self, path: &str) -> Result<(&mut IntWidth, &mut Vec<u64>)> {
        match self.nodes.get_mut(path) {
            Some(Node::Fixed { width, values }) => Ok((width, values)),
            Some(_) => Err(Error::Corruption(format!("{path} is not a fixed array"))),
            None => Err(Error::Corruption(format!("{path} does not exist"))),
        }
    }

    fn varlen_mut(&mut self, path: &str) -> Result<&mut Vec<Vec<u64>>> {
        match self.nodes.get_mut(path) {
            Some(Node::Varlen { rows }) => Ok(rows),
            Some(_) => Err(Error::Corruption(format!("{path} is not a varlen array"))),
            None => Err(Error::Corruption(format!("{path} does not exist"))),
        }
    }
}

impl NodeStore for InMemoryStore {
    fn create_group(&mut self, parent: &str, name: &str) -> Result<()> {
        let path = if parent.is_empty() {
            name.to_string()
        } else {
            format!("{parent}/{name}")
        };
        self.nodes.entry(path).or_insert(Node::Group);
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    fn create_fixed_array(&mut self, path: &str, width: IntWidth) -> Result<()> {
        self.nodes.entry(path.to_string()).or_insert(Node::Fixed {
            width,
            values: Vec::new(),
        });
        Ok(())
    }

    fn append_fixed(&mut self, path: &str, value: u64) -> Result<()> {
        let (width, values) = self.fixed_mut(path)?;
        if value >> width.bits().min(63) != 0 && width.bits() < 64 {
            return Err(Error::InvalidArgument(format!(
                "value {value} does not fit in the {} bits declared for {path}",
                width.bits()
            )));
        }
        values.push(value);
        Ok(())
    }

    fn read_fixed(&self, path: &str) -> Result<&[u64]> {
        match self.nodes.get(path) {
            Some(Node::Fixed { values, .. }) => Ok(values),
            Some(_) => Err(Error::Corruption(format!("{path} is not a fixed array"))),
            None => Err(Error::Corruption(format!("{path} does not exist"))),
        }
    }

    fn create_varlen_array(&mut self, path: &str) -> Result<()> {
        self.nodes
            .entry(path.to_string())
            .or_insert(Node::Varlen { rows: Vec::new() });
        Ok(())
    }

    fn append_varlen(&mut self, path: &str, values: Vec<u64>) -> Result<()> {
        self.varlen_mut(path)?.push(values);
        Ok(())
    }

    fn read_varlen(&self, path: &str, row: usize) -> Result<&[u64]> {
        match self.nodes.get(path) {
            Some(Node::Varlen { rows }) => rows.get(row).map(Vec::as_slice).ok_or_else(|| {
                Error::Corruption(format!("{path} has no row {row}"))
            }),
            Some(_) => Err(Error::Corruption(format!("{path} is not a varlen array"))),
            None => Err(Error::Corruption(format!("{path} does not exist"))),
        }
    }

    fn varlen_len(&self, path: &str) -> Result<usize> {
        match self.nodes.get(path) {
            Some(Node::Varlen { rows }) => Ok(rows.len()),
            Some(_) => Err(Error::Corruption(format!("{path} is not a varlen array"))),
            None => Err(Error::Corruption(format!("{path} does not exist"))),
        }
    }

    fn set_attribute(&mut self, path: &str, key: &str, value: Vec<i64>) -> Result<()> {
        self.attributes
            .insert((path.to_string(), key.to_string()), value);
        Ok(())
    }

    fn get_attribute(&self, path: &str, key: &str) -> Result<Option<&[i64]>> {
        Ok(self
            .attributes
            .get(&(path.to_string(), key.to_string()))
            .map(Vec::as_slice))
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
