//! Integration tests for the task source and result sink over XLSX
//! workbooks.

use std::fs;
use std::path::{Path, PathBuf};

use assert_matches::assert_matches;
use calamine::{open_workbook, Reader, Xlsx};
use relocale_core::error::CoreError;
use relocale_core::types::{TaskResult, TransformOutput, WorkItem};
use relocale_dataset::{
    DatasetResultSink, DatasetTaskSource, ResultSink, TaskSource, RESULTS_SHEET,
};
use rust_xlsxwriter::Workbook;

/// Write a workbook with the given `(sheet name, rows)` pairs.
fn write_workbook(path: &Path, sheets: &[(&str, &[&[&str]])]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet name should be valid");
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                worksheet
                    .write_string(r as u32, c as u16, *cell)
                    .expect("cell should be written");
            }
        }
    }
    workbook.save(path).expect("workbook should be saved");
}

fn read_results_sheet(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("workbook should open");
    let range = workbook
        .worksheet_range(RESULTS_SHEET)
        .expect("Results sheet should exist");
    range
        .rows()
        .map(|cells| cells.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

fn success(item: &WorkItem, converted_name: &str) -> TaskResult {
    TaskResult::success(
        item,
        TransformOutput {
            converted_name: converted_name.to_string(),
            output_path: PathBuf::from("converted").join(converted_name),
        },
    )
}

const CAPTIONS: &[&[&str]] = &[
    &["Image Name", "Detected Text", "Translated Text"],
    &["izhod.png", "Izhod", "Východ"],
    &["vhod.png", "Vhod", "Vchod"],
];

const SUMMARY: &[&[&str]] = &[&["not", "the", "data"]];

#[test]
fn load_reads_results_sheet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("captions.xlsx");
    write_workbook(
        &path,
        &[
            ("Summary", SUMMARY),
            (RESULTS_SHEET, CAPTIONS),
        ],
    );

    let items = DatasetTaskSource::new(&path, "images")
        .load()
        .expect("workbook should load");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].row, 0);
    assert_eq!(items[0].item_name, "izhod.png");
    assert_eq!(items[0].translated_text, "Východ");
    assert_eq!(items[0].image_path, Path::new("images").join("izhod.png"));
    assert_eq!(items[1].item_name, "vhod.png");
}

#[test]
fn load_falls_back_to_first_sheet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("captions.xlsx");
    write_workbook(&path, &[("Sheet1", CAPTIONS)]);

    let items = DatasetTaskSource::new(&path, "images")
        .load()
        .expect("workbook should load");
    assert_eq!(items.len(), 2);
}

#[test]
fn corrupt_workbook_is_data_unavailable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("captions.xlsx");
    fs::write(&path, "definitely not a zip archive").expect("write");

    let result = DatasetTaskSource::new(&path, "images").load();
    assert_matches!(result, Err(CoreError::DataUnavailable(_)));
}

#[test]
fn persist_writes_results_sheet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("captions.xlsx");
    write_workbook(&input, &[(RESULTS_SHEET, CAPTIONS)]);
    let items = DatasetTaskSource::new(&input, "images")
        .load()
        .expect("workbook should load");

    let output = dir.path().join("results").join("updated_results_captions.xlsx");
    DatasetResultSink::new(&input, &output)
        .persist(&[
            TaskResult::failure(&items[1], "rate limited"),
            success(&items[0], "vychod.png"),
        ])
        .expect("results should persist");

    assert_eq!(
        read_results_sheet(&output),
        vec![
            vec![
                "Item Name",
                "Detected Text",
                "Translated Text",
                "Converted Item Name"
            ],
            vec!["izhod.png", "Izhod", "Východ", "vychod.png"],
            vec!["vhod.png", "Vhod", "Vchod", ""],
        ]
    );
}

#[test]
fn xlsx_input_can_be_written_as_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("captions.xlsx");
    write_workbook(&input, &[(RESULTS_SHEET, CAPTIONS)]);
    let items = DatasetTaskSource::new(&input, "images")
        .load()
        .expect("workbook should load");

    let output = dir.path().join("out.csv");
    DatasetResultSink::new(&input, &output)
        .persist(&[success(&items[1], "vchod.png")])
        .expect("results should persist");

    let written = fs::read_to_string(&output).expect("output should exist");
    assert_eq!(
        written.lines().collect::<Vec<_>>(),
        vec![
            "Item Name,Detected Text,Translated Text,Converted Item Name",
            "izhod.png,Izhod,Východ,",
            "vhod.png,Vhod,Vchod,vchod.png",
        ]
    );
}

#[test]
fn unsupported_output_extension_is_storage_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("captions.xlsx");
    write_workbook(&input, &[(RESULTS_SHEET, CAPTIONS)]);

    let result = DatasetResultSink::new(&input, dir.path().join("out.ods")).persist(&[]);
    assert_matches!(result, Err(CoreError::Storage(msg)) if msg.contains("Unsupported"));
}
