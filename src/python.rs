use std::path::PathBuf;

use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(e: crate::Error) -> PyErr {
    match e {
        crate::Error::Patch(e) => PyValueError::new_err(e.to_string()),
        crate::Error::Io(e) => PyOSError::new_err(e.to_string()),
    }
}

#[pyfunction]
fn patch_lines(lines: Vec<String>, patch: &str) -> PyResult<Vec<String>> {
    crate::patch_lines(&lines, patch).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pyfunction]
fn patch_text(text: &str, patch: &str) -> PyResult<String> {
    crate::patch_text(text, patch).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pyfunction]
#[pyo3(signature = (path, patch, output=None))]
fn patch_file(path: PathBuf, patch: &str, output: Option<PathBuf>) -> PyResult<()> {
    crate::patch_file(&path, patch, output.as_deref()).map_err(to_py_err)
}

#[pymodule]
fn textpatch(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(patch_lines, m)?)?;
    m.add_function(wrap_pyfunction!(patch_text, m)?)?;
    m.add_function(wrap_pyfunction!(patch_file, m)?)?;
    Ok(())
}
