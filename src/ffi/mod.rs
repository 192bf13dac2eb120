#[cfg(feature = "python")]
pub mod python;

#[cfg(feature = "python")]
pub use python::*;
