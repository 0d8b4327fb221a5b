//! File-format dispatch.

use std::path::Path;

use crate::error::DatasetError;
use crate::rows::{DatasetRows, Row};
use crate::{csv_file, xlsx_file};

/// Supported dataset file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Xlsx,
}

impl DatasetFormat {
    /// Format implied by the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    fn of(path: &Path) -> Result<Self, DatasetError> {
        Self::from_path(path).ok_or_else(|| DatasetError::UnsupportedFormat(path.to_path_buf()))
    }
}

/// Read a dataset in the format given by its extension.
pub fn read_dataset(path: &Path) -> Result<DatasetRows, DatasetError> {
    match DatasetFormat::of(path)? {
        DatasetFormat::Csv => csv_file::read(path),
        DatasetFormat::Xlsx => xlsx_file::read(path),
    }
}

/// Write `rows` to `path` in the format given by its extension,
/// creating missing parent directories.
pub fn write_dataset(path: &Path, rows: &[Row]) -> Result<(), DatasetError> {
    let format = DatasetFormat::of(path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    match format {
        DatasetFormat::Csv => csv_file::write(path, rows),
        DatasetFormat::Xlsx => xlsx_file::write(path, rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("a/captions.csv")),
            Some(DatasetFormat::Csv)
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("Captions.XLSX")),
            Some(DatasetFormat::Xlsx)
        );
        assert_eq!(DatasetFormat::from_path(Path::new("captions.xls")), None);
        assert_eq!(DatasetFormat::from_path(Path::new("captions")), None);
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let result = read_dataset(Path::new("captions.txt"));
        assert!(matches!(result, Err(DatasetError::UnsupportedFormat(_))));
    }
}
