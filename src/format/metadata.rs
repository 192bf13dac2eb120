// In: src/format/metadata.rs

//! Packing and unpacking of the single metadata byte.
//!
//! The byte fully determines how every following byte of a stream is parsed,
//! so it is always written first and read first.

use super::constants::*;
use crate::error::{BitmaskError, Result};
use crate::types::{code_for, kind_for, NumericKind};

/// The decoded contents of a metadata byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    /// `true` when a bitmask-encoded block sequence follows, `false` for a flat array.
    pub encoded: bool,
    pub kind: NumericKind,
    /// Valid elements in the final mask byte. 0 means the last block is full.
    pub trailing_count: u8,
}

/// Assembles the metadata byte.
///
/// # Errors
/// Returns `BitmaskError::InvalidArgument` if `trailing_count > 7`.
pub fn pack(encoded: bool, kind: NumericKind, trailing_count: u8) -> Result<u8> {
    if trailing_count > MAX_TRAILING_COUNT {
        return Err(BitmaskError::InvalidArgument(format!(
            "trailing_count must be in [0, {}], got {}",
            MAX_TRAILING_COUNT, trailing_count
        )));
    }

    let tag = code_for(kind);
    let mut byte = (trailing_count << SHIFT_TRAILING) | (tag.index << SHIFT_TYPE_INDEX);
    if encoded {
        byte |= ENCODED_BIT;
    }
    if tag.is_float {
        byte |= FLOAT_BIT;
    }
    Ok(byte)
}

/// Splits a metadata byte back into its fields.
///
/// # Errors
/// Returns `BitmaskError::InvalidTypeCode` if the embedded type index is out of
/// range for its family.
pub fn unpack(byte: u8) -> Result<Metadata> {
    let is_float = byte & FLOAT_BIT != 0;
    let index = (byte & MASK_TYPE_INDEX) >> SHIFT_TYPE_INDEX;
    Ok(Metadata {
        encoded: byte & ENCODED_BIT != 0,
        kind: kind_for(is_float, index)?,
        trailing_count: (byte & MASK_TRAILING) >> SHIFT_TRAILING,
    })
}

impl Metadata {
    pub fn new(encoded: bool, kind: NumericKind, trailing_count: u8) -> Self {
        Self {
            encoded,
            kind,
            trailing_count,
        }
    }

    pub fn to_byte(&self) -> Result<u8> {
        pack(self.encoded, self.kind, self.trailing_count)
    }

    /// Reads the metadata byte at the head of `stream`.
    ///
    /// # Errors
    /// `BitmaskError::EmptyStream` if there is no first byte.
    pub fn read_from(stream: &[u8]) -> Result<Self> {
        let first = *stream.first().ok_or(BitmaskError::EmptyStream)?;
        unpack(first)
    }
}
