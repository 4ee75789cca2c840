//! Reading survey files from disk and writing the analyzed table back.

use pole_guard::prelude::*;
use pole_guard::sources::{write_analyzed_csv, CsvSource, PoleSource};
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

fn write_survey(dir: &TempDir, name: &str, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    path
}

fn read_output(path: &std::path::Path, delimiter: u8) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

fn analyze_file(input: &std::path::Path, output: &std::path::Path, options: CsvOptions) {
    let table = CsvSource::new(input).with_options(options.clone()).load().unwrap();
    let report = BatchRunner::new(AnalyzerConfig::default()).run(&table);
    write_analyzed_csv(output, &table, &report.results, &options).unwrap();
}

#[test]
fn test_analyzed_table_appends_mr_and_phoa() {
    let dir = TempDir::new().unwrap();
    let input = write_survey(
        &dir,
        "poles.csv",
        &[
            "HANDLE,TYPE,LWSTPWR,CATV,COMNTS",
            "'P-1',JNT,PWR 25 0,CATV 18 6,ok",
            "'P-2',JNT,PWR 21 0,CATV 18 6,low power",
        ],
    );
    let output = dir.path().join("analyzed.csv");
    analyze_file(&input, &output, CsvOptions::default());

    let rows = read_output(&output, b',');
    assert_eq!(rows[0], vec!["HANDLE", "TYPE", "LWSTPWR", "CATV", "COMNTS", "MR", "PHOA"]);
    assert_eq!(rows[1][0], "'P-1'");
    assert_eq!(rows[1][5], "");
    assert_eq!(rows[1][6], "234");
    assert_eq!(
        rows[2][5],
        "Needs Make Ready for the following reason(s):\nPHOA within 18 inches from lowest power.\n"
    );
    assert_eq!(rows[2][6], "234");
}

#[test]
fn test_rejected_rows_pass_through() {
    let dir = TempDir::new().unwrap();
    let input = write_survey(
        &dir,
        "poles.csv",
        &["HANDLE,CATV", "'P-1',CATV 18 6", "'',CATV 20 0", "'P-3',"],
    );
    let output = dir.path().join("analyzed.csv");
    analyze_file(&input, &output, CsvOptions::default());

    let rows = read_output(&output, b',');
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2][0], "''");
    assert_eq!(rows[2][2], "Not analyzed: Row 2 has no pole handle");
    assert_eq!(rows[2][3], "");
    assert_eq!(rows[3][3], "266");
}

#[test]
fn test_duplicate_handle_keeps_first_position() {
    let dir = TempDir::new().unwrap();
    let input = write_survey(
        &dir,
        "poles.csv",
        &[
            "HANDLE,CATV,LWSTPWR",
            "'P-1',CATV 18 6,PWR 21 0",
            "'P-2',CATV 18 6,PWR 30 0",
            "P-1,CATV 18 6,PWR 30 0",
        ],
    );
    let output = dir.path().join("analyzed.csv");
    analyze_file(&input, &output, CsvOptions::default());

    let rows = read_output(&output, b',');
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][0], "P-1");
    assert_eq!(rows[1][2], "PWR 30 0");
    assert_eq!(rows[1][3], "");
    assert_eq!(rows[2][0], "'P-2'");
}

#[test]
fn test_semicolon_delimited_survey() {
    let dir = TempDir::new().unwrap();
    let input = write_survey(
        &dir,
        "poles.csv",
        &["HANDLE;TYPE;CATV;PLHT", "T-1;telcopl;CATV 18 6;22 2"],
    );
    let output = dir.path().join("analyzed.csv");
    analyze_file(&input, &output, CsvOptions::default().with_delimiter(b';'));

    let rows = read_output(&output, b';');
    assert_eq!(rows[0].last().map(String::as_str), Some("PHOA"));
    assert_eq!(rows[1][4], "");
    assert_eq!(rows[1][5], "234");
}

#[test]
fn test_short_rows_are_padded() {
    let dir = TempDir::new().unwrap();
    let input = write_survey(&dir, "poles.csv", &["HANDLE,CATV,LWSTPWR,COMNTS", "P-1,CATV 18 6"]);
    let output = dir.path().join("analyzed.csv");
    analyze_file(&input, &output, CsvOptions::default());

    let rows = read_output(&output, b',');
    assert_eq!(rows[1], vec!["P-1", "CATV 18 6", "", "", "", "234"]);
}

#[test]
fn test_long_rows_keep_mr_and_phoa_aligned() {
    let dir = TempDir::new().unwrap();
    let input = write_survey(&dir, "poles.csv", &["HANDLE,LWSTPWR", "P1,PWR 25 0,stray"]);
    let output = dir.path().join("analyzed.csv");
    analyze_file(&input, &output, CsvOptions::default());

    let rows = read_output(&output, b',');
    assert_eq!(rows[0], vec!["HANDLE", "LWSTPWR", "MR", "PHOA"]);
    assert_eq!(
        rows[1],
        vec![
            "P1",
            "PWR 25 0",
            "Needs Make Ready for the following reason(s):\nPHOA within 34 inches from lowest power.\n",
            "266",
        ]
    );
}

#[test]
fn test_missing_handle_column_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = write_survey(&dir, "poles.csv", &["POLE,CATV", "P-1,CATV 18 6"]);

    let err = CsvSource::new(&input).load().unwrap_err();
    assert!(matches!(err, PoleError::MissingColumn { ref column } if column == "HANDLE"));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = CsvSource::new(dir.path().join("absent.csv")).load().unwrap_err();
    assert!(matches!(err, PoleError::Io(_)));
}
