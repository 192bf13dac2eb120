//! This file is the root of the `bitmask_codec` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`kernels`, `bridge`, etc.)
//!     so the Rust compiler knows they exist.
//! 2.  Re-exporting the types and functions most callers need.
//! 3.  Defining the `#[pymodule]` which acts as the main entry point when the
//!     compiled library is imported into Python (behind the `python` feature).

//==================================================================================
// 0. Constants
//==================================================================================

/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod config;
pub mod error;
pub mod format;
pub mod kernels;
pub mod types;
mod utils;

mod ffi;

pub use config::CodecConfig;
pub use error::{BitmaskError, Result};
pub use format::{pack, unpack, Metadata};
pub use kernels::{decode_any, decode_bitmask, decode_flat, encode_bitmask, encode_flat};
pub use types::{code_for, kind_for, width_of, Element, NumericKind, NumericSequence, TypeTag};

//==================================================================================
// 2. Python Module Definition
//==================================================================================
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The `bitmask_codec` Python module, containing all exposed Rust functions.
#[cfg(feature = "python")]
#[pymodule]
fn bitmask_codec(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // --- Byte-level conversions ---
    m.add_function(wrap_pyfunction!(ffi::encode_stream_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::decode_stream_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::toggle_stream_py, m)?)?;

    // --- File-level conversions ---
    m.add_function(wrap_pyfunction!(ffi::convert_file_py, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::read_values_py, m)?)?;

    // --- Expose the custom error type ---
    m.add(
        "BitmaskError",
        m.py().get_type_bound::<pyo3::exceptions::PyValueError>(),
    )?;

    // --- Expose version string as a module attribute ---
    m.add("__version__", VERSION)?;

    m.add_function(wrap_pyfunction!(ffi::enable_verbose_logging_py, m)?)?;
    Ok(())
}
