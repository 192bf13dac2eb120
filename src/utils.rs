//! This module provides a set of shared, low-level utility functions used
//! throughout the codec core.
//!
//! Its primary responsibility is moving whole slices between typed values and
//! their little-endian byte form. On little-endian targets this is a plain
//! `bytemuck` cast; elsewhere each value is byte-swapped individually.

use crate::error::Result;
use crate::types::Element;

/// Appends the little-endian bytes of every value in `data` to `out`.
pub fn extend_le_bytes<T: Element>(data: &[T], out: &mut Vec<u8>) {
    if cfg!(target_endian = "little") {
        out.extend_from_slice(bytemuck::cast_slice(data));
    } else {
        out.reserve(data.len() * T::WIDTH);
        for &value in data {
            value.write_le(out);
        }
    }
}

/// Reads a whole buffer of little-endian values.
///
/// The caller must have checked that `bytes.len()` is a multiple of `T::WIDTH`.
///
/// # Errors
/// Returns `BitmaskError::PodCast` if the byte slice cannot be reinterpreted
/// (only possible when its length does not match the element width).
pub fn le_bytes_to_vec<T: Element>(bytes: &[u8]) -> Result<Vec<T>> {
    if cfg!(target_endian = "little") {
        match bytemuck::try_cast_slice::<u8, T>(bytes) {
            Ok(typed) => Ok(typed.to_vec()),
            // Buffers sliced out of a file are rarely aligned for T; copy instead.
            Err(bytemuck::PodCastError::TargetAlignmentGreaterAndInputNotAligned) => {
                Ok(bytemuck::pod_collect_to_vec::<u8, T>(bytes))
            }
            Err(e) => Err(e.into()),
        }
    } else {
        Ok(bytes
            .chunks_exact(T::WIDTH)
            .filter_map(T::read_le)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    #[test]
    fn test_extend_le_bytes_is_little_endian() {
        let mut out = Vec::new();
        extend_le_bytes(&[258i16, -1], &mut out);
        assert_eq!(out, vec![0x02, 0x01, 0xFF, 0xFF]);
    }

    #[test]
    fn test_le_bytes_roundtrip_unaligned() {
        let original: Vec<f64> = vec![1.5, -2.25, 1e10];
        let mut bytes = vec![0xAA]; // force a misaligned view
        extend_le_bytes(&original, &mut bytes);
        let decoded = le_bytes_to_vec::<f64>(&bytes[1..]).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_le_bytes_every_start_offset() {
        // At least one of these offsets is misaligned for i64 whatever the allocator does.
        let original: Vec<i64> = vec![i64::MIN, 0, 7, i64::MAX];
        for offset in 0..8 {
            let mut bytes = vec![0u8; offset];
            extend_le_bytes(&original, &mut bytes);
            assert_eq!(le_bytes_to_vec::<i64>(&bytes[offset..]).unwrap(), original);
        }
    }

    #[test]
    fn test_le_bytes_half_precision() {
        let original = vec![f16::from_f32(0.5), f16::from_f32(-3.0)];
        let mut bytes = Vec::new();
        extend_le_bytes(&original, &mut bytes);
        assert_eq!(le_bytes_to_vec::<f16>(&bytes).unwrap(), original);
    }
}
