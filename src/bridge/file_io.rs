// In: src/bridge/file_io.rs

//! File-level conversions. Each file is classified, converted to the other
//! layout, and written back through a temporary sibling that is renamed into
//! place, so a failed conversion leaves the original untouched.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::bridge::csv::parse_csv;
use crate::bridge::dispatcher::{classify_path, FileType};
use crate::bridge::stateless_api::{decode_stream, encode_stream, read_sequence};
use crate::config::CodecConfig;
use crate::error::{BitmaskError, Result};
use crate::kernels;
use crate::types::NumericSequence;

/// What a single `convert_file` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub from: FileType,
    pub to: FileType,
    pub input_size: usize,
    pub output_size: usize,
}

/// Converts one file to the opposite representation.
///
/// * `Csv`: parsed with `config.csv_kind` and written next to the source with
///   `config.output_extension`, bitmask-encoded unless `encode_csv` is off.
/// * `FlatBinary`: encoded in place.
/// * `EncodedBinary`: decoded to a flat array in place.
///
/// Only `.csv`, `.bin` and `config.output_extension` files are considered;
/// anything else is reported as `MalformedSource` and left untouched.
pub fn convert_file(path: &Path, config: &CodecConfig) -> Result<ConversionReport> {
    let from = classify_path(path, &config.output_extension)?;
    log::debug!("{} classified as {}", path.display(), from);

    let (output, bytes, input_size, to) = match from {
        FileType::Csv => {
            let text = fs::read_to_string(path)?;
            let seq = parse_csv(&text, config.csv_kind)?;
            let output = path.with_extension(&config.output_extension);
            if output == path {
                return Err(BitmaskError::InvalidArgument(format!(
                    "output extension {:?} would overwrite the CSV source",
                    config.output_extension
                )));
            }
            let (bytes, to) = if config.encode_csv {
                (kernels::encode_bitmask(&seq)?, FileType::EncodedBinary)
            } else {
                (kernels::encode_flat(&seq)?, FileType::FlatBinary)
            };
            (output, bytes, text.len(), to)
        }
        FileType::FlatBinary => {
            let input = fs::read(path)?;
            (path.to_path_buf(), encode_stream(&input)?, input.len(), FileType::EncodedBinary)
        }
        FileType::EncodedBinary => {
            let input = fs::read(path)?;
            (path.to_path_buf(), decode_stream(&input)?, input.len(), FileType::FlatBinary)
        }
        FileType::Unrecognized => {
            return Err(BitmaskError::MalformedSource(format!(
                "{}: unrecognized file type",
                path.display()
            )));
        }
    };

    write_replacing(&output, &bytes)?;
    log::info!(
        "{} ({}, {} bytes) -> {} ({}, {} bytes)",
        path.display(),
        from,
        input_size,
        output.display(),
        to,
        bytes.len()
    );

    Ok(ConversionReport {
        source: path.to_path_buf(),
        output,
        from,
        to,
        input_size,
        output_size: bytes.len(),
    })
}

/// Converts every file independently and in parallel. Results are returned
/// in the order of `paths`; one failure does not stop the others.
pub fn convert_files(paths: &[PathBuf], config: &CodecConfig) -> Vec<Result<ConversionReport>> {
    paths.par_iter().map(|path| convert_file(path, config)).collect()
}

/// Reads any recognised file into a sequence without modifying it.
pub fn view_file(path: &Path, config: &CodecConfig) -> Result<NumericSequence> {
    match classify_path(path, &config.output_extension)? {
        FileType::Csv => parse_csv(&fs::read_to_string(path)?, config.csv_kind),
        FileType::FlatBinary | FileType::EncodedBinary => read_sequence(&fs::read(path)?),
        FileType::Unrecognized => Err(BitmaskError::MalformedSource(format!(
            "{}: unrecognized file type",
            path.display()
        ))),
    }
}

fn write_replacing(target: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            BitmaskError::InvalidArgument(format!("{} is not a file path", target.display()))
        })?;
    let tmp = target.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, target) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
