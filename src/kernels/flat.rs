//! This module contains the pure, stateless kernels for the flat binary array.
//!
//! A flat stream is the metadata byte (`encoded = 0`, `trailing_count = 0`)
//! followed by every value as a fixed-width little-endian slot, with no mask
//! bytes. It is the layout the bitmask encoder consumes and the decoder's
//! results are written back as.

use crate::error::{BitmaskError, Result};
use crate::format::{pack, METADATA_SIZE};
use crate::types::Element;
use crate::utils::{extend_le_bytes, le_bytes_to_vec};

/// Encodes `values` into a complete flat stream, metadata byte included.
pub fn encode<T: Element>(values: &[T], output_buf: &mut Vec<u8>) -> Result<()> {
    output_buf.clear();
    output_buf.reserve(METADATA_SIZE + values.len() * T::WIDTH);
    output_buf.push(pack(false, T::KIND, 0)?);
    extend_le_bytes(values, output_buf);
    Ok(())
}

/// Decodes the value slots that follow the metadata byte.
///
/// # Errors
/// `BitmaskError::TruncatedStream` if `body` is not a whole number of slots.
pub fn decode<T: Element>(body: &[u8]) -> Result<Vec<T>> {
    let partial = body.len() % T::WIDTH;
    if partial != 0 {
        return Err(BitmaskError::TruncatedStream {
            offset: METADATA_SIZE + body.len() - partial,
            needed: T::WIDTH,
            available: partial,
        });
    }
    le_bytes_to_vec(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::unpack;
    use crate::types::NumericKind;
    use half::f16;

    #[test]
    fn test_flat_layout() {
        let mut out = Vec::new();
        encode(&[1i16, 0, -1], &mut out).unwrap();

        let meta = unpack(out[0]).unwrap();
        assert!(!meta.encoded);
        assert_eq!(meta.kind, NumericKind::Int16);
        assert_eq!(meta.trailing_count, 0);
        assert_eq!(&out[1..], &[0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF]);
    }

    #[test]
    fn test_flat_keeps_zeros() {
        let values = vec![f16::from_f32(0.0), f16::from_f32(2.5), f16::from_f32(0.0)];
        let mut out = Vec::new();
        encode(&values, &mut out).unwrap();
        assert_eq!(out.len(), 1 + 3 * 2);
        assert_eq!(decode::<f16>(&out[1..]).unwrap(), values);
    }

    #[test]
    fn test_flat_partial_slot_is_truncation() {
        let result = decode::<i32>(&[1, 0, 0, 0, 2, 0]);
        assert!(matches!(
            result,
            Err(BitmaskError::TruncatedStream { offset: 5, needed: 4, available: 2 })
        ));
    }
}
