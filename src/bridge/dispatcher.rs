// In: src/bridge/dispatcher.rs

//! Classifies a source as CSV, flat binary, or bitmask-encoded binary.
//!
//! The result is a closed enum so every caller handles `Unrecognized`
//! explicitly instead of falling through to a guess.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::format::unpack;

/// The kind of source a conversion request starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Csv,
    FlatBinary,
    EncodedBinary,
    Unrecognized,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Csv => "csv",
            Self::FlatBinary => "flat_binary",
            Self::EncodedBinary => "encoded_binary",
            Self::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}

/// Extension of binary files when no other is configured.
pub const BINARY_EXTENSION: &str = "bin";

/// What a file name alone says about its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameClass {
    Csv,
    Binary,
    Other,
}

fn name_class(name: &Path, binary_extension: &str) -> NameClass {
    let ext = name.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    if ext.eq_ignore_ascii_case("csv") {
        NameClass::Csv
    } else if ext.eq_ignore_ascii_case(BINARY_EXTENSION)
        || (!ext.is_empty() && ext.eq_ignore_ascii_case(binary_extension))
    {
        NameClass::Binary
    } else {
        NameClass::Other
    }
}

fn classify_first_byte(first_byte: Option<u8>) -> FileType {
    match first_byte.map(unpack) {
        Some(Ok(meta)) if meta.encoded => FileType::EncodedBinary,
        Some(Ok(_)) => FileType::FlatBinary,
        Some(Err(e)) => {
            log::debug!("first byte is not a metadata byte: {}", e);
            FileType::Unrecognized
        }
        None => FileType::Unrecognized,
    }
}

/// Classifies a source from its file name and/or the first byte of its content,
/// treating only `.bin` files as binary.
pub fn classify(file_name: Option<&Path>, first_byte: Option<u8>) -> FileType {
    classify_with_extension(file_name, first_byte, BINARY_EXTENSION)
}

/// Classifies a source, accepting `binary_extension` as well as `.bin` for
/// binary files.
///
/// A `.csv` extension (any case) wins. A binary extension, or no file name at
/// all, defers to the first byte, which must unpack as a valid metadata byte
/// whose `encoded` bit picks the layout. Any other extension is
/// `Unrecognized`, whatever the content.
pub fn classify_with_extension(
    file_name: Option<&Path>,
    first_byte: Option<u8>,
    binary_extension: &str,
) -> FileType {
    match file_name.map(|name| name_class(name, binary_extension)) {
        Some(NameClass::Csv) => FileType::Csv,
        Some(NameClass::Other) => FileType::Unrecognized,
        Some(NameClass::Binary) | None => classify_first_byte(first_byte),
    }
}

/// Classifies the file at `path`. Only files with a binary extension are
/// opened, and then only their first byte is read.
pub fn classify_path(path: &Path, binary_extension: &str) -> Result<FileType> {
    match name_class(path, binary_extension) {
        NameClass::Csv => Ok(FileType::Csv),
        NameClass::Other => {
            log::debug!("{} has neither a csv nor a binary extension", path.display());
            Ok(FileType::Unrecognized)
        }
        NameClass::Binary => {
            let mut first = [0u8; 1];
            let read = File::open(path)?.read(&mut first)?;
            Ok(classify_first_byte((read == 1).then_some(first[0])))
        }
    }
}
