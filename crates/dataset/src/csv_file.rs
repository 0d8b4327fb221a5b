//! CSV backend.

use std::path::Path;

use crate::error::DatasetError;
use crate::rows::{DatasetRows, Row};

/// Read every record; rows may have different lengths.
pub(crate) fn read(path: &Path) -> Result<DatasetRows, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let records = reader
        .records()
        .map(|record| record.map(|record| record.iter().map(str::to_string).collect::<Row>()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DatasetRows::from_records(records))
}

pub(crate) fn write(path: &Path, rows: &[Row]) -> Result<(), DatasetError> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
