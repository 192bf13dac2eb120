// In: src/bridge/stateless_api.rs

use serde::Serialize;

use crate::error::{BitmaskError, Result};
use crate::format::{Metadata, METADATA_SIZE};
use crate::kernels;
use crate::types::{NumericKind, NumericSequence};

/// Header summary of a binary stream, as reported by `inspect_stream`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamInfo {
    pub encoded: bool,
    pub kind: NumericKind,
    pub trailing_count: u8,
    pub element_count: usize,
    pub total_size: usize,
    pub payload_size: usize,
}

/// Converts a flat stream into its bitmask-encoded form.
///
/// # Errors
/// `BitmaskError::AlreadyEncoded` if the input is already encoded.
pub fn encode_stream(flat_bytes: &[u8]) -> Result<Vec<u8>> {
    if Metadata::read_from(flat_bytes)?.encoded {
        return Err(BitmaskError::AlreadyEncoded);
    }
    let seq = kernels::decode_flat(flat_bytes)?;
    kernels::encode_bitmask(&seq)
}

/// Converts a bitmask-encoded stream back into a flat stream.
///
/// # Errors
/// `BitmaskError::AlreadyDecoded` if the input is already flat.
pub fn decode_stream(encoded_bytes: &[u8]) -> Result<Vec<u8>> {
    if !Metadata::read_from(encoded_bytes)?.encoded {
        return Err(BitmaskError::AlreadyDecoded);
    }
    let seq = kernels::decode_bitmask(encoded_bytes)?;
    kernels::encode_flat(&seq)
}

/// Flips a stream to the other layout, whichever one it is currently in.
pub fn toggle_stream(bytes: &[u8]) -> Result<Vec<u8>> {
    if Metadata::read_from(bytes)?.encoded {
        decode_stream(bytes)
    } else {
        encode_stream(bytes)
    }
}

/// Decodes either binary layout into a sequence.
pub fn read_sequence(bytes: &[u8]) -> Result<NumericSequence> {
    kernels::decode_any(bytes)
}

/// Summarises a stream. The body is fully decoded, so a malformed stream
/// is reported here rather than summarised.
pub fn inspect_stream(bytes: &[u8]) -> Result<StreamInfo> {
    let meta = Metadata::read_from(bytes)?;
    let seq = read_sequence(bytes)?;
    Ok(StreamInfo {
        encoded: meta.encoded,
        kind: meta.kind,
        trailing_count: meta.trailing_count,
        element_count: seq.len(),
        total_size: bytes.len(),
        payload_size: bytes.len() - METADATA_SIZE,
    })
}
