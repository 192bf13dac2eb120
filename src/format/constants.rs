//! Bit layout of the metadata byte that opens every binary stream.
//!
//! ```text
//!   7   6 5 4   3 2 1   0
//! [enc][trail ][type ][flt]
//! ```

/// Encoded flag, 0x80
pub(crate) const ENCODED_BIT: u8 = 0b1000_0000;
/// Trailing-block element count, 0x70
pub(crate) const MASK_TRAILING: u8 = 0b0111_0000;
pub(crate) const SHIFT_TRAILING: u32 = 4;
/// Type index within the family, 0x0e
pub(crate) const MASK_TYPE_INDEX: u8 = 0b0000_1110;
pub(crate) const SHIFT_TYPE_INDEX: u32 = 1;
/// Float family flag, 0x01
pub(crate) const FLOAT_BIT: u8 = 0b0000_0001;

/// Largest value the 3-bit trailing field can hold.
pub const MAX_TRAILING_COUNT: u8 = 7;

/// Elements covered by one mask byte.
pub const BLOCK_LEN: usize = 8;

/// Size of the metadata header in bytes.
pub const METADATA_SIZE: usize = 1;
