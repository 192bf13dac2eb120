//! This module serves as the public API and dispatcher for the two codec
//! kernels.
//!
//! The kernels themselves are generic over `Element`. The dispatchers below
//! resolve the element kind once, from the `NumericSequence` variant when
//! encoding or from the metadata byte when decoding, and call the matching
//! monomorphised kernel.

use crate::error::{BitmaskError, Result};
use crate::format::Metadata;
use crate::types::{Element, NumericSequence};
use crate::{with_kind, with_sequence};

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Zero-eliding mask-byte blocks.
pub mod bitmask;

/// Plain fixed-width arrays.
pub mod flat;

//==================================================================================
// 2. Public API (Unified Dispatchers)
//==================================================================================

/// Encodes a sequence into a bitmask stream.
pub fn encode_bitmask(seq: &NumericSequence) -> Result<Vec<u8>> {
    let mut output_buf = Vec::new();
    with_sequence!(seq, values => bitmask::encode(values, &mut output_buf))?;
    Ok(output_buf)
}

/// Encodes a sequence into a flat stream.
pub fn encode_flat(seq: &NumericSequence) -> Result<Vec<u8>> {
    let mut output_buf = Vec::new();
    with_sequence!(seq, values => flat::encode(values, &mut output_buf))?;
    Ok(output_buf)
}

/// Decodes a bitmask stream.
///
/// # Errors
/// `BitmaskError::NotEncoded` if the metadata byte describes a flat stream,
/// plus any metadata or truncation error.
pub fn decode_bitmask(stream: &[u8]) -> Result<NumericSequence> {
    let meta = Metadata::read_from(stream)?;
    if !meta.encoded {
        return Err(BitmaskError::NotEncoded);
    }
    let body = &stream[1..];
    with_kind!(meta.kind, T => bitmask::decode::<T>(body, meta.trailing_count).map(T::into_sequence))
}

/// Decodes a flat stream.
///
/// # Errors
/// `BitmaskError::AlreadyEncoded` if the metadata byte describes a bitmask
/// stream, plus any metadata or truncation error.
pub fn decode_flat(stream: &[u8]) -> Result<NumericSequence> {
    let meta = Metadata::read_from(stream)?;
    if meta.encoded {
        return Err(BitmaskError::AlreadyEncoded);
    }
    if meta.trailing_count != 0 {
        log::debug!(
            "flat stream carries trailing_count {}; ignored",
            meta.trailing_count
        );
    }
    let body = &stream[1..];
    with_kind!(meta.kind, T => flat::decode::<T>(body).map(T::into_sequence))
}

/// Decodes either layout, as selected by the metadata byte.
pub fn decode_any(stream: &[u8]) -> Result<NumericSequence> {
    if Metadata::read_from(stream)?.encoded {
        decode_bitmask(stream)
    } else {
        decode_flat(stream)
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericKind;
    use half::f16;

    fn sample(kind: NumericKind) -> NumericSequence {
        NumericSequence::from_i64s(kind, &[0, 3, 0, 0, -7, 0, 0, 0, 0, 12, 0]).unwrap()
    }

    #[test]
    fn test_dispatch_roundtrip_every_kind() {
        for kind in NumericKind::ALL {
            let seq = sample(kind);
            let encoded = encode_bitmask(&seq).unwrap();
            let decoded = decode_bitmask(&encoded).unwrap();
            assert_eq!(decoded.kind(), kind);
            assert_eq!(decoded, seq);

            let flat = encode_flat(&seq).unwrap();
            assert_eq!(decode_flat(&flat).unwrap(), seq);
        }
    }

    #[test]
    fn test_float32_is_not_promoted() {
        let seq = NumericSequence::Float32(vec![1.5, 0.0, -2.0]);
        let decoded = decode_bitmask(&encode_bitmask(&seq).unwrap()).unwrap();
        assert_eq!(decoded.kind(), NumericKind::Float32);
        assert_eq!(decoded.as_slice::<f32>(), Some(&[1.5f32, 0.0, -2.0][..]));
    }

    #[test]
    fn test_wrong_direction_errors() {
        let seq = NumericSequence::Float16(vec![f16::from_f32(1.0)]);
        let flat = encode_flat(&seq).unwrap();
        let encoded = encode_bitmask(&seq).unwrap();

        assert!(matches!(decode_bitmask(&flat), Err(BitmaskError::NotEncoded)));
        assert!(matches!(decode_flat(&encoded), Err(BitmaskError::AlreadyEncoded)));
        assert_eq!(decode_any(&flat).unwrap(), seq);
        assert_eq!(decode_any(&encoded).unwrap(), seq);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(decode_any(&[]), Err(BitmaskError::EmptyStream)));
    }
}
