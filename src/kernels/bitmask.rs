//! This module contains the pure, stateless kernels for bitmask zero-elision.
//!
//! The sequence is cut into blocks of 8 elements. Each block is written as one
//! mask byte, followed by the fixed-width payload of every non-zero element in
//! that block. Bit 7 of the mask is the block's first element, bit 0 its last.
//! Zero elements are recorded only by a cleared mask bit and cost no payload.
//!
//! The final block may be short. Its element count lives in the metadata
//! byte's `trailing_count`, and its unused mask bits are written as zero.
//! There is no end-of-stream sentinel: the decoder tells the final block apart
//! from a full one purely from the number of bytes that remain.

use bitvec::prelude::*;

use crate::error::{BitmaskError, Result};
use crate::format::{pack, BLOCK_LEN, METADATA_SIZE};
use crate::types::Element;

//==================================================================================
// 1. Mask Helpers
//==================================================================================

/// Mask byte with the first `count` block positions set (MSB first).
#[inline]
pub(crate) fn lead_mask(count: usize) -> u8 {
    (0xFF00u16 >> count.min(BLOCK_LEN)) as u8
}

/// Bytes one block occupies: its mask byte plus one payload per set bit.
#[inline]
fn block_size(mask: u8, width: usize) -> usize {
    1 + mask.count_ones() as usize * width
}

//==================================================================================
// 2. Encoder
//==================================================================================

/// Encodes `values` into a complete bitmask stream, metadata byte included.
///
/// The output buffer is cleared first. Output size is always
/// `1 + ceil(n / 8) + WIDTH * count_nonzero`.
pub fn encode<T: Element>(values: &[T], output_buf: &mut Vec<u8>) -> Result<()> {
    output_buf.clear();

    let trailing_count = (values.len() % BLOCK_LEN) as u8;
    output_buf.push(pack(true, T::KIND, trailing_count)?);

    // One presence bit per element, MSB-first, so each raw byte is a block mask.
    let presence: BitVec<u8, Msb0> = values.iter().map(|v| !v.is_zero()).collect();
    let nonzero = presence.count_ones();
    output_buf.reserve(values.len().div_ceil(BLOCK_LEN) + nonzero * T::WIDTH);

    for (block, &raw_mask) in values.chunks(BLOCK_LEN).zip(presence.as_raw_slice()) {
        // Dead bits past a short block are not guaranteed clear by bitvec.
        output_buf.push(raw_mask & lead_mask(block.len()));
        for &value in block.iter().filter(|v| !v.is_zero()) {
            value.write_le(output_buf);
        }
    }

    log_metric!(
        "event" = "bitmask_encode",
        "kind" = T::KIND,
        "elements" = values.len(),
        "nonzero" = nonzero,
        "trailing_count" = trailing_count,
        "bytes" = output_buf.len()
    );
    Ok(())
}

//==================================================================================
// 3. Decoder
//==================================================================================

/// Decodes the block sequence that follows the metadata byte.
///
/// # Args
/// * `body`: the stream with its metadata byte already stripped.
/// * `trailing_count`: valid elements in the final block, 0 if it is full.
///
/// # Errors
/// `BitmaskError::TruncatedStream` when a mask or payload runs past the end of
/// `body`, or when a short final block was announced but never arrived.
/// Offsets in the error are relative to the start of the whole stream.
pub fn decode<T: Element>(body: &[u8], trailing_count: u8) -> Result<Vec<T>> {
    let width = T::WIDTH;
    let trailing = trailing_count as usize;

    let mut values = Vec::with_capacity(body.len());
    let mut pos = 0;

    while pos < body.len() {
        let mask = body[pos];
        let remaining = body.len() - pos;

        if trailing != 0 {
            // The final block is the one whose first `trailing` bits account for
            // exactly the bytes that are left. Its padding bits are ignored.
            let final_mask = mask & lead_mask(trailing);
            if block_size(final_mask, width) == remaining {
                decode_block(final_mask, trailing, &body[pos + 1..], pos, &mut values)?;
                log::trace!("decoded final block of {} at offset {}", trailing, pos);
                return Ok(values);
            }
        }

        let size = block_size(mask, width);
        if size > remaining {
            return Err(BitmaskError::TruncatedStream {
                offset: METADATA_SIZE + pos,
                needed: size,
                available: remaining,
            });
        }
        decode_block(mask, BLOCK_LEN, &body[pos + 1..pos + size], pos, &mut values)?;
        pos += size;
    }

    if trailing != 0 {
        // Every byte was consumed by full blocks; the short block is missing.
        return Err(BitmaskError::TruncatedStream {
            offset: METADATA_SIZE + pos,
            needed: 1,
            available: 0,
        });
    }
    Ok(values)
}

/// Emits the first `count` positions of one block, reading a payload for
/// every set bit and a zero for every cleared one.
fn decode_block<T: Element>(
    mask: u8,
    count: usize,
    payload: &[u8],
    block_offset: usize,
    values: &mut Vec<T>,
) -> Result<()> {
    let mut slots = payload.chunks_exact(T::WIDTH);
    for present in mask.view_bits::<Msb0>()[..count].iter().by_vals() {
        if !present {
            values.push(T::zero());
            continue;
        }
        let value = slots.next().and_then(T::read_le).ok_or_else(|| {
            BitmaskError::TruncatedStream {
                offset: METADATA_SIZE + block_offset + 1,
                needed: block_size(mask, T::WIDTH) - 1,
                available: payload.len(),
            }
        })?;
        values.push(value);
    }
    Ok(())
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::unpack;
    use crate::types::NumericKind;

    fn encode_to_vec<T: Element>(values: &[T]) -> Vec<u8> {
        let mut out = Vec::new();
        encode(values, &mut out).unwrap();
        out
    }

    fn decode_stream<T: Element>(stream: &[u8]) -> Result<Vec<T>> {
        let meta = unpack(stream[0])?;
        decode::<T>(&stream[1..], meta.trailing_count)
    }

    #[test]
    fn test_lead_mask() {
        assert_eq!(lead_mask(0), 0x00);
        assert_eq!(lead_mask(1), 0x80);
        assert_eq!(lead_mask(3), 0xE0);
        assert_eq!(lead_mask(8), 0xFF);
    }

    #[test]
    fn test_encode_block_edges() {
        let values: Vec<i8> = vec![1, 0, 0, 0, 0, 0, 0, 0, 2];
        let encoded = encode_to_vec(&values);

        let meta = unpack(encoded[0]).unwrap();
        assert!(meta.encoded);
        assert_eq!(meta.kind, NumericKind::Int8);
        assert_eq!(meta.trailing_count, 1);

        // mask 0 has only its MSB set, then value 1; mask 1 likewise, then value 2.
        assert_eq!(&encoded[1..], &[0b1000_0000, 1, 0b1000_0000, 2]);
        assert_eq!(decode_stream::<i8>(&encoded).unwrap(), values);
    }

    #[test]
    fn test_all_zero_int32_has_no_payload() {
        let values = vec![0i32; 16];
        let encoded = encode_to_vec(&values);
        assert_eq!(encoded.len(), 3);
        assert_eq!(&encoded[1..], &[0x00, 0x00]);
        assert_eq!(unpack(encoded[0]).unwrap().trailing_count, 0);
        assert_eq!(decode_stream::<i32>(&encoded).unwrap(), values);
    }

    #[test]
    fn test_empty_sequence_is_metadata_only() {
        let encoded = encode_to_vec::<f32>(&[]);
        assert_eq!(encoded.len(), 1);
        assert!(decode_stream::<f32>(&encoded).unwrap().is_empty());
    }

    #[test]
    fn test_exact_multiple_of_eight() {
        let values: Vec<i16> = (1..=16).map(|v| if v % 3 == 0 { 0 } else { v * 100 }).collect();
        let encoded = encode_to_vec(&values);
        assert_eq!(unpack(encoded[0]).unwrap().trailing_count, 0);
        assert_eq!(encoded.len(), 1 + 2 + 2 * 11);
        assert_eq!(decode_stream::<i16>(&encoded).unwrap(), values);
    }

    #[test]
    fn test_payload_is_little_endian_in_sequence_order() {
        let values: Vec<i32> = vec![0, -2, 0, 0x0102_0304];
        let encoded = encode_to_vec(&values);
        assert_eq!(
            &encoded[1..],
            &[0b0101_0000, 0xFE, 0xFF, 0xFF, 0xFF, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn test_short_block_whose_mask_is_zero() {
        let values: Vec<i64> = vec![5, 6, 7, 8, 9, 10, 11, 12, 0, 0, 0];
        let encoded = encode_to_vec(&values);
        assert_eq!(*encoded.last().unwrap(), 0x00);
        assert_eq!(decode_stream::<i64>(&encoded).unwrap(), values);
    }

    #[test]
    fn test_final_block_padding_bits_are_ignored() {
        // trailing_count = 2, final mask claims bit 5 as well: padding, not data.
        let meta = pack(true, NumericKind::Int8, 2).unwrap();
        let stream = vec![meta, 0b1010_0000, 9];
        assert_eq!(decode_stream::<i8>(&stream).unwrap(), vec![9, 0]);
    }

    #[test]
    fn test_truncated_payload_is_rejected() {
        let values: Vec<i32> = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let encoded = encode_to_vec(&values);
        let result = decode_stream::<i32>(&encoded[..encoded.len() - 1]);
        assert!(matches!(result, Err(BitmaskError::TruncatedStream { .. })));
    }

    #[test]
    fn test_missing_final_block_is_rejected() {
        let values: Vec<i8> = vec![1, 1, 1, 1, 1, 1, 1, 1, 3];
        let encoded = encode_to_vec(&values);
        // Drop the short block entirely (mask + payload).
        let result = decode_stream::<i8>(&encoded[..encoded.len() - 2]);
        assert!(matches!(
            result,
            Err(BitmaskError::TruncatedStream { needed: 1, available: 0, .. })
        ));
    }

    #[test]
    fn test_full_block_truncated_mid_payload() {
        let meta = pack(true, NumericKind::Int16, 0).unwrap();
        // mask says 8 values (16 bytes) but only 3 bytes follow.
        let stream = vec![meta, 0xFF, 1, 0, 2];
        match decode_stream::<i16>(&stream) {
            Err(BitmaskError::TruncatedStream { offset, needed, available }) => {
                assert_eq!(offset, 1);
                assert_eq!(needed, 17);
                assert_eq!(available, 4);
            }
            other => panic!("Expected TruncatedStream, got {:?}", other),
        }
    }

    #[test]
    fn test_float_zero_elision() {
        let values: Vec<f64> = vec![0.0, 1.25, -0.0, f64::MAX, 0.0];
        let encoded = encode_to_vec(&values);
        assert_eq!(encoded.len(), 1 + 1 + 2 * 8);
        let decoded = decode_stream::<f64>(&encoded).unwrap();
        assert_eq!(decoded, values);
    }
}
