//! This module defines the core, strongly-typed data representations used
//! throughout the codec.
//!
//! It includes the canonical `NumericKind` enum with its type registry, and the
//! `NumericSequence` container that every codec direction produces or consumes.

pub mod numeric_kind;
pub mod sequence;

// Re-export the main type(s) for easier access.
pub use numeric_kind::{code_for, kind_for, width_of, NumericKind, TypeTag};
pub use sequence::{Element, NumericSequence};
