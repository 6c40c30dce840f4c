use crate::ReportDecodeError;
use camino::Utf8Path;
use scanlens_types::ScanStatus;

/// Decode `scan_status.json` text.
pub fn decode_status(text: &str) -> Result<ScanStatus, ReportDecodeError> {
    Ok(serde_json::from_str(text)?)
}

/// Read and decode the status file at `path`.
pub fn read_status(path: &Utf8Path) -> Result<ScanStatus, ReportDecodeError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReportDecodeError::Read {
        path: path.to_owned(),
        source,
    })?;
    decode_status(&text)
}
