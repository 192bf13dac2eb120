// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing API of the codec. It sits between the outside
// world (files, CSV text, ndarray arrays, Python) and the pure `kernels`, which
// only ever see typed slices and byte buffers.
//
// Data Flow (File Conversion):
//
//   1. [Dispatcher (classify_path)]        -> Reads the file name and first byte
//         |
//         `-> Csv | FlatBinary | EncodedBinary | Unrecognized
//
//   2. [File I/O (convert_file)]           -> Reads the source
//         |
//         `-> a. Csv: `csv::parse_csv` -> `NumericSequence`
//         |
//         `-> b. Binary: `stateless_api::{encode_stream, decode_stream}`
//
//   3. [Kernels (encode_bitmask / decode_bitmask / flat)] -> Return `Result<Vec<u8>>`
//         |
//         `-> written through a temporary sibling and renamed into place
//
// ====================================================================================
pub mod csv;
pub mod dispatcher;
pub mod file_io;
pub mod stateless_api;
#[cfg(feature = "tensor")]
pub mod tensor;

// --- File-Level API ---
pub use dispatcher::{classify, classify_path, classify_with_extension, FileType, BINARY_EXTENSION};
pub use file_io::{convert_file, convert_files, view_file, ConversionReport};

// --- Low-Level Stateless API (for FFI and testing) ---
pub use stateless_api::{
    decode_stream, encode_stream, inspect_stream, read_sequence, toggle_stream, StreamInfo,
};

#[cfg(test)]
mod tests;
