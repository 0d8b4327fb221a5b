//! Format-independent row model.
//!
//! Sources and sinks both read the dataset through
//! [`DatasetRows::from_records`] so that a data row index means the same
//! record on the way in and on the way out.

/// One dataset row as text cells.
pub type Row = Vec<String>;

/// Column headers written to every updated dataset.
pub const COLUMN_HEADERS: [&str; 4] = [
    "Item Name",
    "Detected Text",
    "Translated Text",
    "Converted Item Name",
];

/// Number of leading columns every data row must provide.
pub const REQUIRED_COLUMNS: usize = 3;

/// Index of the column holding the converted item name.
pub const CONVERTED_COLUMN: usize = 3;

/// Column titles that mark a record as a header row.
const HEADER_LABELS: [&str; 6] = [
    "item name",
    "image name",
    "file name",
    "filename",
    "detected text",
    "translated text",
];

/// A dataset split into its optional header and its data rows.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DatasetRows {
    pub header: Option<Row>,
    pub rows: Vec<Row>,
}

impl DatasetRows {
    /// Drop blank records and split off the first record as the header
    /// when [`is_header`] says so.
    pub fn from_records(records: impl IntoIterator<Item = Row>) -> Self {
        let mut dataset = Self::default();
        for record in records {
            if is_blank(&record) {
                continue;
            }
            if dataset.header.is_none() && dataset.rows.is_empty() && is_header(&record) {
                dataset.header = Some(record);
                continue;
            }
            dataset.rows.push(record);
        }
        dataset
    }
}

/// Whether any of the leading columns carries a known column title
/// (trimmed, case-insensitive).
pub fn is_header(record: &[String]) -> bool {
    record.iter().take(REQUIRED_COLUMNS).any(|cell| {
        let cell = cell.trim().to_lowercase();
        HEADER_LABELS.contains(&cell.as_str())
    })
}

fn is_blank(record: &[String]) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}
