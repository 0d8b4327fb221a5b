//! File and directory naming conventions for batch runs.

use std::path::Path;

use chrono::{DateTime, Utc};

/// Prefix of the updated dataset written to the results directory.
pub const RESULTS_FILE_PREFIX: &str = "updated_results_";

/// Force a `.png` extension onto a file name.
///
/// A name that already ends in `.png` (any casing) is returned as is.
/// Any other extension is replaced, and a missing one is added. Leading
/// directories are dropped when the extension has to change.
///
/// # Examples
///
/// ```
/// use relocale_core::naming::ensure_png_extension;
///
/// assert_eq!(ensure_png_extension("izhod.png"), "izhod.png");
/// assert_eq!(ensure_png_extension("izhod.jpg"), "izhod.png");
/// assert_eq!(ensure_png_extension("izhod"), "izhod.png");
/// ```
pub fn ensure_png_extension(file_name: &str) -> String {
    let path = Path::new(file_name);
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => file_name.to_string(),
        _ => {
            let stem = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default();
            format!("{stem}.png")
        }
    }
}

/// Directory name for one run's converted images: the run start time
/// as `YYYY-MM-DD_HH-MM-SS`, which sorts lexically by time.
pub fn run_directory_name(started_at: DateTime<Utc>) -> String {
    started_at.format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// File name of the updated dataset derived from the input file name.
pub fn results_file_name(input_file_name: &str) -> String {
    format!("{RESULTS_FILE_PREFIX}{input_file_name}")
}
