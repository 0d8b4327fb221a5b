//! XLSX backend: `calamine` reads, `rust_xlsxwriter` writes.

use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use rust_xlsxwriter::Workbook;

use crate::error::DatasetError;
use crate::rows::{DatasetRows, Row};

/// Worksheet holding the dataset, read and written.
pub const RESULTS_SHEET: &str = "Results";

/// Read the `Results` sheet, or the first sheet when there is none.
pub(crate) fn read(path: &Path) -> Result<DatasetRows, DatasetError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let names = workbook.sheet_names();
    let sheet = if names.iter().any(|name| name == RESULTS_SHEET) {
        RESULTS_SHEET.to_string()
    } else {
        let first = names.first().cloned().ok_or(DatasetError::NoWorksheet)?;
        tracing::warn!(
            dataset = %path.display(),
            sheet = %first,
            "No Results sheet, reading the first worksheet",
        );
        first
    };

    let range = workbook.worksheet_range(&sheet)?;
    Ok(DatasetRows::from_records(range_rows(&range)))
}

/// Rows of a used range, padded so cell `i` of every row is column `i`.
fn range_rows(range: &Range<Data>) -> Vec<Row> {
    let leading = range.start().map_or(0, |(_, col)| col as usize);
    range
        .rows()
        .map(|cells| {
            std::iter::repeat(String::new())
                .take(leading)
                .chain(cells.iter().map(|cell| cell.to_string()))
                .collect()
        })
        .collect()
}

/// Write `rows` into a fresh workbook with a single `Results` sheet.
pub(crate) fn write(path: &Path, rows: &[Row]) -> Result<(), DatasetError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(RESULTS_SHEET)?;

    for (row_num, row) in (0u32..).zip(rows) {
        for (col_num, cell) in (0u16..).zip(row) {
            if !cell.is_empty() {
                worksheet.write_string(row_num, col_num, cell)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
