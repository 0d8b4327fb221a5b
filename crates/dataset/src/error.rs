use std::path::PathBuf;

/// Failure to read or write a dataset file.
///
/// Callers map it onto [`CoreError`](relocale_core::error::CoreError):
/// `DataUnavailable` when loading, `Storage` when persisting.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file extension is neither `.csv` nor `.xlsx`.
    #[error("Unsupported dataset format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Workbook has no worksheets")]
    NoWorksheet,
}
