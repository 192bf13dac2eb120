// In: src/ffi/python.rs

use log::LevelFilter;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Once;

use crate::bridge;
use crate::config::CodecConfig;
use crate::types::NumericKind;

//==================================================================================
// I. Stateless Byte-Level API
//==================================================================================

/// Converts a flat array stream into its bitmask-encoded form.
#[pyfunction]
#[pyo3(name = "encode_stream")]
pub fn encode_stream_py<'py>(py: Python<'py>, data: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
    let encoded = py.allow_threads(|| bridge::encode_stream(data))?;
    Ok(PyBytes::new_bound(py, &encoded))
}

/// Converts a bitmask-encoded stream back into a flat array stream.
#[pyfunction]
#[pyo3(name = "decode_stream")]
pub fn decode_stream_py<'py>(py: Python<'py>, data: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
    let flat = py.allow_threads(|| bridge::decode_stream(data))?;
    Ok(PyBytes::new_bound(py, &flat))
}

#[pyfunction]
#[pyo3(name = "toggle_stream")]
pub fn toggle_stream_py<'py>(py: Python<'py>, data: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
    let toggled = py.allow_threads(|| bridge::toggle_stream(data))?;
    Ok(PyBytes::new_bound(py, &toggled))
}

//==================================================================================
// II. File-Level API
//==================================================================================

/// Converts a file in place (or, for CSV, next to the source) and returns a
/// dict describing the conversion.
#[pyfunction]
#[pyo3(name = "convert_file")]
#[pyo3(signature = (path, csv_kind = "float64", encode_csv = true, output_extension = "bin"))]
pub fn convert_file_py(
    py: Python,
    path: PathBuf,
    csv_kind: &str,
    encode_csv: bool,
    output_extension: &str,
) -> PyResult<PyObject> {
    let config = CodecConfig {
        csv_kind: csv_kind.parse::<NumericKind>()?,
        encode_csv,
        output_extension: output_extension.to_string(),
        ..CodecConfig::default()
    };
    let report = py.allow_threads(|| bridge::convert_file(&path, &config))?;

    let result_dict = PyDict::new_bound(py);
    result_dict.set_item("source", report.source.to_string_lossy().into_owned())?;
    result_dict.set_item("output", report.output.to_string_lossy().into_owned())?;
    result_dict.set_item("from", report.from.to_string())?;
    result_dict.set_item("to", report.to.to_string())?;
    result_dict.set_item("input_size", report.input_size)?;
    result_dict.set_item("output_size", report.output_size)?;

    Ok(result_dict.into())
}

/// Reads any recognised file and returns its values as a list: Python ints
/// for the integer kinds, floats for the float kinds.
#[pyfunction]
#[pyo3(name = "read_values")]
#[pyo3(signature = (path, csv_kind = "float64"))]
pub fn read_values_py(py: Python, path: PathBuf, csv_kind: &str) -> PyResult<PyObject> {
    let config = CodecConfig {
        csv_kind: csv_kind.parse::<NumericKind>()?,
        ..CodecConfig::default()
    };
    let seq = py.allow_threads(|| bridge::view_file(&path, &config))?;
    Ok(match seq.values_as_i64() {
        Some(ints) => ints.into_py(py),
        None => seq.values_as_f64().into_py(py),
    })
}

//==================================================================================
// III. Logging
//==================================================================================

static INIT_LOGGER: Once = Once::new();

/// Installs the process-wide logger on the first successful call; later calls
/// are no-ops. A log file that cannot be opened is reported before the logger
/// is touched, so the call can be retried.
#[pyfunction]
#[pyo3(name = "enable_verbose_logging")]
#[pyo3(signature = (log_file = None))]
pub fn enable_verbose_logging_py(log_file: Option<String>) -> PyResult<()> {
    let log_target = match log_file {
        Some(filename) => Some(
            OpenOptions::new()
                .append(true)
                .create(true)
                .open(&filename)
                .map_err(|e| {
                    pyo3::exceptions::PyIOError::new_err(format!(
                        "could not open log file {}: {}",
                        filename, e
                    ))
                })?,
        ),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Info);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = log_target {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unopenable_log_file_does_not_consume_init() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("no_such_dir").join("codec.log");
        assert!(enable_verbose_logging_py(Some(bad.to_string_lossy().into_owned())).is_err());
        assert!(!INIT_LOGGER.is_completed());

        let good = dir.path().join("codec.log");
        assert!(enable_verbose_logging_py(Some(good.to_string_lossy().into_owned())).is_ok());
        assert!(INIT_LOGGER.is_completed());
        assert!(log::log_enabled!(log::Level::Info));
    }
}
