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

//! Picks the narrowest unsigned integer width that can index a dimension of
//! a given size. A condition count, gene count, or row count all need this:
//! a store backing tens of conditions should not spend 64 bits per index
//! when 8 would do.

use crate::error::{Error, Result};

/// The unsigned integer widths a dimension can be packed into, narrowest
/// first.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IntWidth {
    U8,
    U16,
    U32,
    U64,
}

impl IntWidth {
    /// Number of bits of the chosen representation.
    #[inline]
    pub fn bits(self) -> u32 {
        match self {
            IntWidth::U8 => 8,
            IntWidth::U16 => 16,
            IntWidth::U32 => 32,
            IntWidth::U64 => 64,
        }
    }
}

/// Returns the narrowest `IntWidth` whose range covers `dim_size` distinct
/// indices `0 ..= dim_size - 1`. Fails with `InvalidArgument` if `dim_size`
/// exceeds what even `u64` can index (never happens in practice, but the
/// bound must be checked rather than silently wrapped).
pub fn size_for_dimension(dim_size: u64) -> Result<IntWidth> {
    for width in [IntWidth::U8, IntWidth::U16, IntWidth::U32, IntWidth::U64] {
        if fits(dim_size, width) {
            return Ok(width);
        }
    }
    Err(Error::InvalidArgument(format!(
        "dimension of size {dim_size} cannot be represented in any supported integer width"
    )))
}

#[inline]
fn fits(dim_size: u64, width: IntWidth) -> bool {
    match width.bits() {
        64 => true,
        bits => dim_size <= (1u64 << bits),
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_sizing {
    use super::*;

    #[test]
    fn small_dimension_fits_u8() {
        assert_eq!(IntWidth::U8, size_for_dimension(200).unwrap());
    }

    #[test]
    fn boundary_at_256_still_fits_u8() {
        assert_eq!(IntWidth::U8, size_for_dimension(256).unwrap());
    }

    #[test]
    fn just_over_u8_boundary_needs_u16() {
        assert_eq!(IntWidth::U16, size_for_dimension(257).unwrap());
    }

    #[test]
    fn mid_size_needs_u32() {
        assert_eq!(IntWidth::U32, size_for_dimension(70_000).unwrap());
    }

    #[test]
    fn huge_size_needs_u64() {
        assert_eq!(IntWidth::U64, size_for_dimension(1u64 << 40).unwrap());
    }

    #[test]
    fn bits_reports_the_expected_width() {
        assert_eq!(8, IntWidth::U8.bits());
        assert_eq!(64, IntWidth::U64.bits());
    }
}
