//! The in-memory numeric sequence and the `Element` trait that ties each Rust
//! primitive to its registered `NumericKind`.
//!
//! All fixed-width value encodings are little-endian: two's complement for the
//! integer kinds, IEEE-754 for the float kinds.

use half::f16;
use num_traits::{NumCast, ToPrimitive, Zero};
use std::fmt::Debug;

use crate::error::{BitmaskError, Result};
use crate::types::NumericKind;

//==================================================================================
// 1. The Element Trait
//==================================================================================

/// A primitive that can be stored by the codec.
pub trait Element:
    Copy + PartialEq + Debug + Zero + ToPrimitive + bytemuck::Pod + Send + Sync + 'static
{
    const KIND: NumericKind;
    const WIDTH: usize;

    /// Appends the little-endian representation of `self` to `out`.
    fn write_le(self, out: &mut Vec<u8>);

    /// Reads one value from exactly `WIDTH` little-endian bytes.
    /// Returns `None` if `bytes` has the wrong length.
    fn read_le(bytes: &[u8]) -> Option<Self>;

    /// Narrows an integer into this kind, `None` if it does not fit.
    fn from_i64_checked(value: i64) -> Option<Self>;

    /// Narrows a float into this kind, `None` if it does not fit.
    fn from_f64_checked(value: f64) -> Option<Self>;

    fn into_sequence(values: Vec<Self>) -> NumericSequence;

    fn slice_of(seq: &NumericSequence) -> Option<&[Self]>;
}

macro_rules! impl_element_common {
    ($t:ty, $variant:ident, $width:expr) => {
        const KIND: NumericKind = NumericKind::$variant;
        const WIDTH: usize = $width;

        #[inline]
        fn write_le(self, out: &mut Vec<u8>) {
            out.extend_from_slice(&self.to_le_bytes());
        }

        #[inline]
        fn read_le(bytes: &[u8]) -> Option<Self> {
            <[u8; $width]>::try_from(bytes).ok().map(<$t>::from_le_bytes)
        }

        fn into_sequence(values: Vec<Self>) -> NumericSequence {
            NumericSequence::$variant(values)
        }

        fn slice_of(seq: &NumericSequence) -> Option<&[Self]> {
            match seq {
                NumericSequence::$variant(values) => Some(values.as_slice()),
                _ => None,
            }
        }
    };
}

macro_rules! impl_int_element {
    ($t:ty, $variant:ident, $width:expr) => {
        impl Element for $t {
            impl_element_common!($t, $variant, $width);

            fn from_i64_checked(value: i64) -> Option<Self> {
                <$t>::try_from(value).ok()
            }

            fn from_f64_checked(value: f64) -> Option<Self> {
                // Integral values only; a fractional part never silently truncates.
                if !value.is_finite() || value.fract() != 0.0 {
                    return None;
                }
                <$t as NumCast>::from(value)
            }
        }
    };
}

impl_int_element!(i8, Int8, 1);
impl_int_element!(i16, Int16, 2);
impl_int_element!(i32, Int32, 4);
impl_int_element!(i64, Int64, 8);

impl Element for f16 {
    impl_element_common!(f16, Float16, 2);

    fn from_i64_checked(value: i64) -> Option<Self> {
        Self::from_f64_checked(value as f64)
    }

    fn from_f64_checked(value: f64) -> Option<Self> {
        let narrowed = f16::from_f64(value);
        if value.is_finite() && narrowed.is_infinite() {
            None
        } else {
            Some(narrowed)
        }
    }
}

impl Element for f32 {
    impl_element_common!(f32, Float32, 4);

    fn from_i64_checked(value: i64) -> Option<Self> {
        Self::from_f64_checked(value as f64)
    }

    fn from_f64_checked(value: f64) -> Option<Self> {
        if value.is_finite() && value.abs() > f32::MAX as f64 {
            None
        } else {
            Some(value as f32)
        }
    }
}

impl Element for f64 {
    impl_element_common!(f64, Float64, 8);

    fn from_i64_checked(value: i64) -> Option<Self> {
        Some(value as f64)
    }

    fn from_f64_checked(value: f64) -> Option<Self> {
        Some(value)
    }
}

//==================================================================================
// 2. NumericSequence
//==================================================================================

/// An ordered list of values of one `NumericKind`.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericSequence {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float16(Vec<f16>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

/// Runs `$body` with `$values` bound to the typed `Vec` inside `$seq`.
/// The body is monomorphised once per kind.
#[macro_export]
macro_rules! with_sequence {
    ($seq:expr, $values:ident => $body:expr) => {
        match $seq {
            $crate::types::NumericSequence::Int8($values) => $body,
            $crate::types::NumericSequence::Int16($values) => $body,
            $crate::types::NumericSequence::Int32($values) => $body,
            $crate::types::NumericSequence::Int64($values) => $body,
            $crate::types::NumericSequence::Float16($values) => $body,
            $crate::types::NumericSequence::Float32($values) => $body,
            $crate::types::NumericSequence::Float64($values) => $body,
        }
    };
}

/// Runs `$body` with the type alias `$t` bound to the Rust primitive of `$kind`.
#[macro_export]
macro_rules! with_kind {
    ($kind:expr, $t:ident => $body:expr) => {
        match $kind {
            $crate::types::NumericKind::Int8 => {
                type $t = i8;
                $body
            }
            $crate::types::NumericKind::Int16 => {
                type $t = i16;
                $body
            }
            $crate::types::NumericKind::Int32 => {
                type $t = i32;
                $body
            }
            $crate::types::NumericKind::Int64 => {
                type $t = i64;
                $body
            }
            $crate::types::NumericKind::Float16 => {
                type $t = ::half::f16;
                $body
            }
            $crate::types::NumericKind::Float32 => {
                type $t = f32;
                $body
            }
            $crate::types::NumericKind::Float64 => {
                type $t = f64;
                $body
            }
        }
    };
}

impl NumericSequence {
    /// An empty sequence of the given kind.
    pub fn empty(kind: NumericKind) -> Self {
        with_kind!(kind, T => T::into_sequence(Vec::new()))
    }

    pub fn kind(&self) -> NumericKind {
        match self {
            Self::Int8(_) => NumericKind::Int8,
            Self::Int16(_) => NumericKind::Int16,
            Self::Int32(_) => NumericKind::Int32,
            Self::Int64(_) => NumericKind::Int64,
            Self::Float16(_) => NumericKind::Float16,
            Self::Float32(_) => NumericKind::Float32,
            Self::Float64(_) => NumericKind::Float64,
        }
    }

    pub fn len(&self) -> usize {
        with_sequence!(self, values => values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements that will carry a payload in the encoded form.
    pub fn count_nonzero(&self) -> usize {
        with_sequence!(self, values => values.iter().filter(|v| !Zero::is_zero(*v)).count())
    }

    /// Widens every value to `f64`. Lossy for `Int64` beyond 2^53; use
    /// `values_as_i64` or `values_to_strings` where exactness matters.
    pub fn values_as_f64(&self) -> Vec<f64> {
        with_sequence!(self, values => values
            .iter()
            .map(|v| ToPrimitive::to_f64(v).unwrap_or(f64::NAN))
            .collect())
    }

    /// Every value widened to `i64` without loss, `None` for the float kinds.
    pub fn values_as_i64(&self) -> Option<Vec<i64>> {
        if self.kind().is_float() {
            return None;
        }
        with_sequence!(self, values => values
            .iter()
            .map(|v| ToPrimitive::to_i64(v))
            .collect())
    }

    /// Every value formatted with its own type's `Display`.
    pub fn values_to_strings(&self) -> Vec<String> {
        with_sequence!(self, values => values.iter().map(|v| v.to_string()).collect())
    }

    /// Typed view of the values, `None` if `T` is not this sequence's kind.
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::slice_of(self)
    }

    /// Builds a sequence of `kind` from integer literals.
    ///
    /// # Errors
    /// `BitmaskError::ValueOutOfRange` if any value does not fit `kind`.
    pub fn from_i64s(kind: NumericKind, values: &[i64]) -> Result<Self> {
        with_kind!(kind, T => narrow::<T, i64>(values, T::from_i64_checked))
    }

    /// Builds a sequence of `kind` from float literals.
    ///
    /// # Errors
    /// `BitmaskError::ValueOutOfRange` if any value does not fit `kind`
    /// (including fractional values routed to an integer kind).
    pub fn from_f64s(kind: NumericKind, values: &[f64]) -> Result<Self> {
        with_kind!(kind, T => narrow::<T, f64>(values, T::from_f64_checked))
    }
}

fn narrow<T, S>(values: &[S], convert: fn(S) -> Option<T>) -> Result<NumericSequence>
where
    T: Element,
    S: Copy + ToString,
{
    let narrowed = values
        .iter()
        .map(|&v| {
            convert(v).ok_or_else(|| BitmaskError::ValueOutOfRange {
                value: v.to_string(),
                kind: T::KIND,
            })
        })
        .collect::<Result<Vec<T>>>()?;
    Ok(T::into_sequence(narrowed))
}

macro_rules! impl_from_vec {
    ($($t:ty),+) => {
        $(
            impl From<Vec<$t>> for NumericSequence {
                fn from(values: Vec<$t>) -> Self {
                    <$t as Element>::into_sequence(values)
                }
            }
        )+
    };
}

impl_from_vec!(i8, i16, i32, i64, f16, f32, f64);

//==================================================================================
// 3. Unit Tests
//==================================================================================
