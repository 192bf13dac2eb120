// In: src/format/mod.rs

//! Defines the on-disk structures and constants shared by both binary layouts:
//! the metadata byte, and the block geometry of the bitmask-encoded form.

pub(crate) mod constants;
pub mod metadata;

pub use constants::{BLOCK_LEN, MAX_TRAILING_COUNT, METADATA_SIZE};
pub use metadata::{pack, unpack, Metadata};
