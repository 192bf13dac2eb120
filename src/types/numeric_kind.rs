//! This module defines the canonical, type-safe representation of the numeric
//! kinds the codec can store, together with the type registry that maps each
//! kind to the compact 3-bit code carried in the metadata byte.
//!
//! The registry is two ordered candidate lists, one per family. The position of
//! a kind within its family's list IS its on-disk type index, so the order below
//! is part of the binary format and must never change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BitmaskError, Result};

/// The element kind of a numeric sequence. Chosen once per file or stream.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NumericKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Float16,
    Float32,
    Float64,
}

/// The (family, index) pair identifying a `NumericKind` inside the metadata byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    pub is_float: bool,
    pub index: u8,
}

//==================================================================================
// 1. Registry Tables
//==================================================================================

/// Integer candidates, in type-index order.
pub const INT_CANDIDATES: [NumericKind; 4] = [
    NumericKind::Int8,
    NumericKind::Int16,
    NumericKind::Int32,
    NumericKind::Int64,
];

/// Floating-point candidates, in type-index order.
pub const FLOAT_CANDIDATES: [NumericKind; 3] = [
    NumericKind::Float16,
    NumericKind::Float32,
    NumericKind::Float64,
];

fn candidates(is_float: bool) -> &'static [NumericKind] {
    if is_float {
        &FLOAT_CANDIDATES
    } else {
        &INT_CANDIDATES
    }
}

//==================================================================================
// 2. Public Lookup API
//==================================================================================

/// Looks up a kind by family and position.
///
/// # Errors
/// Returns `BitmaskError::InvalidTypeCode` if `index` is not a valid position in
/// the family's candidate list (4 entries for int, 3 for float).
pub fn kind_for(is_float: bool, index: u8) -> Result<NumericKind> {
    candidates(is_float)
        .get(index as usize)
        .copied()
        .ok_or(BitmaskError::InvalidTypeCode { is_float, index })
}

/// Inverse of [`kind_for`].
///
/// `NumericKind` is a closed enum, so every value is registered and the lookup
/// cannot fail.
pub fn code_for(kind: NumericKind) -> TypeTag {
    let is_float = kind.is_float();
    let index = candidates(is_float)
        .iter()
        .position(|&k| k == kind)
        .unwrap_or_default() as u8;
    TypeTag { is_float, index }
}

/// Fixed byte width of one value of `kind`.
pub fn width_of(kind: NumericKind) -> usize {
    match kind {
        NumericKind::Int8 => 1,
        NumericKind::Int16 | NumericKind::Float16 => 2,
        NumericKind::Int32 | NumericKind::Float32 => 4,
        NumericKind::Int64 | NumericKind::Float64 => 8,
    }
}

impl NumericKind {
    /// All registered kinds, integers first, each family in type-index order.
    pub const ALL: [NumericKind; 7] = [
        NumericKind::Int8,
        NumericKind::Int16,
        NumericKind::Int32,
        NumericKind::Int64,
        NumericKind::Float16,
        NumericKind::Float32,
        NumericKind::Float64,
    ];

    /// Returns `true` if the kind is a floating-point number.
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float16 | Self::Float32 | Self::Float64)
    }

    pub fn width(&self) -> usize {
        width_of(*self)
    }

    pub fn type_tag(&self) -> TypeTag {
        code_for(*self)
    }

    /// The canonical lowercase name, identical to the serde representation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float16 => "float16",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }
}

impl TypeTag {
    /// Resolves the tag back to a kind through the registry.
    pub fn kind(&self) -> Result<NumericKind> {
        kind_for(self.is_float, self.index)
    }
}

/// Provides the canonical string representation for a `NumericKind`.
impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a kind from its canonical name, a short Rust-style alias, or the
/// classic single-letter struct format code (`b h i l/q e f d`).
impl FromStr for NumericKind {
    type Err = BitmaskError;

    fn from_str(s: &str) -> Result<Self> {
        // Single letters are case-sensitive ('l' and 'L' differ in struct codes).
        match s {
            "b" => return Ok(Self::Int8),
            "h" => return Ok(Self::Int16),
            "i" => return Ok(Self::Int32),
            "l" | "q" => return Ok(Self::Int64),
            "e" => return Ok(Self::Float16),
            "f" => return Ok(Self::Float32),
            "d" => return Ok(Self::Float64),
            _ => {}
        }
        match s.to_ascii_lowercase().as_str() {
            "int8" | "i8" => Ok(Self::Int8),
            "int16" | "i16" => Ok(Self::Int16),
            "int32" | "i32" => Ok(Self::Int32),
            "int64" | "i64" => Ok(Self::Int64),
            "float16" | "f16" | "half" => Ok(Self::Float16),
            "float32" | "f32" | "float" => Ok(Self::Float32),
            "float64" | "f64" | "double" => Ok(Self::Float64),
            _ => Err(BitmaskError::UnsupportedKind(s.to_string())),
        }
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
