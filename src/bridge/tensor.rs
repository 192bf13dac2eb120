//! Adapter between `ndarray` arrays and the codec's sequences.
//!
//! Arrays of any shape are flattened in logical (row-major) order. Shape is
//! not part of either binary layout, so decoding always yields a 1-D array.

use ndarray::{Array1, ArrayBase, Data, Dimension};

use crate::error::{BitmaskError, Result};
use crate::kernels;
use crate::types::{Element, NumericSequence};

/// Flattens an array of any dimensionality into a sequence.
pub fn sequence_from_array<T, S, D>(array: &ArrayBase<S, D>) -> NumericSequence
where
    T: Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    T::into_sequence(array.iter().copied().collect())
}

/// Copies a sequence into a 1-D array of `T`.
///
/// # Errors
/// `BitmaskError::KindMismatch` if the sequence does not hold `T`.
pub fn array_from_sequence<T: Element>(seq: &NumericSequence) -> Result<Array1<T>> {
    seq.as_slice::<T>()
        .map(|values| Array1::from(values.to_vec()))
        .ok_or(BitmaskError::KindMismatch {
            expected: T::KIND,
            actual: seq.kind(),
        })
}

pub fn array_to_flat_bytes<T, S, D>(array: &ArrayBase<S, D>) -> Result<Vec<u8>>
where
    T: Element,
    S: Data<Elem = T>,
    D: Dimension,
{
    kernels::encode_flat(&sequence_from_array(array))
}

/// Decodes a stream in either layout straight into a 1-D array.
pub fn array_from_stream<T: Element>(bytes: &[u8]) -> Result<Array1<T>> {
    array_from_sequence(&kernels::decode_any(bytes)?)
}
