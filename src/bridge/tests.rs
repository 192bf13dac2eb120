use super::*;
use crate::config::CodecConfig;
use crate::error::BitmaskError;
use crate::kernels;
use crate::types::{NumericKind, NumericSequence};
use std::fs;
use std::path::PathBuf;

fn write_flat(dir: &std::path::Path, name: &str, seq: &NumericSequence) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, kernels::encode_flat(seq).unwrap()).unwrap();
    path
}

#[test]
fn test_csv_is_converted_and_encoded() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("readings.csv");
    fs::write(&csv_path, "0,0,1.5,0,0,0,0,0,0,-3\n").unwrap();

    let report = convert_file(&csv_path, &CodecConfig::default()).unwrap();
    assert_eq!(report.from, FileType::Csv);
    assert_eq!(report.to, FileType::EncodedBinary);
    assert_eq!(report.output, dir.path().join("readings.bin"));
    assert!(csv_path.exists(), "the CSV source is left in place");

    let seq = view_file(&report.output, &CodecConfig::default()).unwrap();
    assert_eq!(
        seq,
        NumericSequence::Float64(vec![0.0, 0.0, 1.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -3.0])
    );
    assert_eq!(fs::read(&report.output).unwrap().len(), 1 + 2 + 2 * 8);
}

#[test]
fn test_csv_without_encoding_stops_at_flat() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("counts.csv");
    fs::write(&csv_path, "1, 2, 0").unwrap();

    let config = CodecConfig {
        csv_kind: NumericKind::Int8,
        encode_csv: false,
        output_extension: "dat".to_string(),
        ..CodecConfig::default()
    };
    let report = convert_file(&csv_path, &config).unwrap();
    assert_eq!(report.to, FileType::FlatBinary);
    assert_eq!(report.output, dir.path().join("counts.dat"));
    assert_eq!(classify_path(&report.output, "dat").unwrap(), FileType::FlatBinary);
    assert_eq!(fs::read(&report.output).unwrap(), vec![0x00, 1, 2, 0]);

    // the configured extension makes the output convertible again
    let encoded = convert_file(&report.output, &config).unwrap();
    assert_eq!(encoded.to, FileType::EncodedBinary);
}

#[test]
fn test_binary_files_toggle_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let seq = NumericSequence::Int32(vec![0, 0, 0, 42, 0, 0, 0, 0, 0]);
    let path = write_flat(dir.path(), "values.bin", &seq);
    let original = fs::read(&path).unwrap();

    let first = convert_file(&path, &CodecConfig::default()).unwrap();
    assert_eq!(first.to, FileType::EncodedBinary);
    assert_eq!(first.output, path);
    assert!(first.output_size < first.input_size);

    let second = convert_file(&path, &CodecConfig::default()).unwrap();
    assert_eq!(second.to, FileType::FlatBinary);
    assert_eq!(fs::read(&path).unwrap(), original);
}

#[test]
fn test_unrecognized_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("junk.bin");
    // float family, type index 7: not a registered kind
    fs::write(&path, [0b0000_1111, 1, 2, 3]).unwrap();

    let result = convert_file(&path, &CodecConfig::default());
    assert!(matches!(result, Err(BitmaskError::MalformedSource(_))));
    assert_eq!(fs::read(&path).unwrap(), vec![0b0000_1111, 1, 2, 3]);
}

#[test]
fn test_non_binary_extension_is_never_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    // '1' happens to unpack as a flat Float16 metadata byte
    fs::write(&path, "1ab").unwrap();

    let result = convert_file(&path, &CodecConfig::default());
    assert!(matches!(result, Err(BitmaskError::MalformedSource(_))));
    assert_eq!(fs::read(&path).unwrap(), b"1ab");
    assert!(matches!(
        view_file(&path, &CodecConfig::default()),
        Err(BitmaskError::MalformedSource(_))
    ));
}

#[test]
fn test_failed_conversion_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.bin");
    // encoded Int32, trailing 1, but the final block's payload is cut short
    let mut stream =
        kernels::encode_bitmask(&NumericSequence::Int32(vec![5])).unwrap();
    stream.pop();
    fs::write(&path, &stream).unwrap();

    let result = convert_file(&path, &CodecConfig::default());
    assert!(matches!(result, Err(BitmaskError::TruncatedStream { .. })));
    assert_eq!(fs::read(&path).unwrap(), stream);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_convert_files_keeps_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for i in 0..6i64 {
        let seq = NumericSequence::from_i64s(NumericKind::Int16, &[0, i, 0, i * 2]).unwrap();
        paths.push(write_flat(dir.path(), &format!("part_{i}.bin"), &seq));
    }
    let missing = dir.path().join("missing.bin");
    paths.insert(3, missing.clone());

    let results = convert_files(&paths, &CodecConfig::default());
    assert_eq!(results.len(), paths.len());
    for (path, result) in paths.iter().zip(&results) {
        if *path == missing {
            assert!(matches!(result, Err(BitmaskError::Io(_))));
        } else {
            assert_eq!(&result.as_ref().unwrap().source, path);
        }
    }
}

#[test]
fn test_view_file_does_not_modify() {
    let dir = tempfile::tempdir().unwrap();
    let seq = NumericSequence::Float32(vec![0.5, 0.0]);
    let path = write_flat(dir.path(), "view.bin", &seq);
    let before = fs::read(&path).unwrap();

    assert_eq!(view_file(&path, &CodecConfig::default()).unwrap(), seq);
    assert_eq!(fs::read(&path).unwrap(), before);
}
