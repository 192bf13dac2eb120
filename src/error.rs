// In: src/error.rs

//! This module defines the single, unified error type for the entire bitmask codec.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Every failure in the binary codec is strict: a malformed stream is always
//! reported, never decoded into a plausible-looking sequence.

use thiserror::Error;

use crate::types::NumericKind;

#[derive(Error, Debug)]
pub enum BitmaskError {
    // =========================================================================
    // === Type Registry & Metadata Errors
    // =========================================================================
    #[error("Invalid type code: index {index} is out of range for the {} family", family_name(.is_float))]
    InvalidTypeCode { is_float: bool, index: u8 },

    #[error("Unsupported numeric kind: {0}")]
    UnsupportedKind(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Value {value} cannot be represented as {kind}")]
    ValueOutOfRange { value: String, kind: NumericKind },

    #[error("Kind mismatch: expected {expected}, found {actual}")]
    KindMismatch {
        expected: NumericKind,
        actual: NumericKind,
    },

    // =========================================================================
    // === Stream Layout Errors
    // =========================================================================
    #[error("Stream is empty: a metadata byte is required")]
    EmptyStream,

    #[error("Truncated stream at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedStream {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Stream is not bitmask encoded; use the flat array path")]
    NotEncoded,

    #[error("Stream is already bitmask encoded")]
    AlreadyEncoded,

    #[error("Stream is already decoded to a flat array")]
    AlreadyDecoded,

    #[error("Malformed source: {0}")]
    MalformedSource(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (e.g., file not found).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while loading a config file.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error from the CSV reader while reading the first record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An error from a safe byte-casting operation failing.
    #[error("Byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error
}

pub type Result<T> = std::result::Result<T, BitmaskError>;

fn family_name(is_float: &bool) -> &'static str {
    if *is_float {
        "float"
    } else {
        "int"
    }
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<bytemuck::PodCastError> for BitmaskError {
    fn from(err: bytemuck::PodCastError) -> Self {
        BitmaskError::PodCast(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<BitmaskError> for pyo3::PyErr {
    fn from(err: BitmaskError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
