//! End-to-end analysis of survey tables.

use pole_guard::attachments::Category;
use pole_guard::clearance::CheckStatus;
use pole_guard::prelude::*;

const SURVEY: &str = "\
HANDLE,TYPE,LWSTPWR,BLNK,TRFCCRCT,STLT,CATV,TELCO,PLHT
'P-1',JNT,PWR 25 0,,,,CATV 18 6,TELCO 17 0,
'P-2',JNT,PWR 21 0,,TRFC 20 2,BTM 19 8,CATV 18 6,,
'T-3',TELCOPL,PWR 30 0,,,,CATV 18 6,,19 0
,JNT,PWR 20 0,,,,,,
'P-5',JNT,PWR 32 0,TRANS BTM 21 6,,,,,
'P-6',JNT,PWR 25 0,,,,CATV 30 0,,
";

fn survey() -> PoleTable {
    PoleTable::from_reader(SURVEY.as_bytes(), &CsvOptions::default()).unwrap()
}

fn generated_table(rows: usize) -> PoleTable {
    let mut data = String::from("HANDLE,TYPE,LWSTPWR,STLT,CATV\n");
    for i in 0..rows {
        let power = if i % 4 == 0 { "PWR 21 0" } else { "PWR 33 0" };
        data.push_str(&format!("'G-{i:05}',JNT,{power},BTM 24 0,CATV 18 6\n"));
    }
    PoleTable::from_reader(data.as_bytes(), &CsvOptions::default()).unwrap()
}

fn result<'a>(report: &'a BatchReport, handle: &str) -> &'a AnalysisResult {
    report
        .results
        .iter()
        .find(|r| r.pole_handle == handle)
        .unwrap_or_else(|| panic!("no result for {handle}"))
}

#[test]
fn test_clear_joint_pole() {
    let report = BatchRunner::new(AnalyzerConfig::default()).run(&survey());
    let pole = result(&report, "P-1");

    assert_eq!(pole.proposed_height, 234);
    assert!(!pole.needs_make_ready);
    assert_eq!(pole.mr_text(), "");
    assert_eq!(pole.categorized.extremum(Category::Communication).unwrap().name, "CATV");
}

#[test]
fn test_reasons_follow_check_order() {
    let report = BatchRunner::new(AnalyzerConfig::default()).run(&survey());
    let pole = result(&report, "P-2");

    assert_eq!(
        pole.reasons,
        vec![
            "PHOA within 2 inches from bottom of a street light.",
            "PHOA within 8 inches from street light or traffic circuit.",
            "PHOA within 18 inches from lowest power.",
        ]
    );
    assert_eq!(
        pole.categorized.extremum(Category::StreetlightBottom).unwrap().name,
        "STLT BTM"
    );
}

#[test]
fn test_telephone_pole_top() {
    let report = BatchRunner::new(AnalyzerConfig::default()).run(&survey());
    let pole = result(&report, "T-3");

    assert_eq!(pole.pole_kind, PoleKind::Telephone);
    assert_eq!(pole.reasons, vec!["PHOA is 6 inches above the top of this pole."]);

    let power = pole.outcomes.iter().find(|o| o.check == "lowest_power").unwrap();
    assert_eq!(power.status, CheckStatus::Skipped);
    assert!(pole.categorized.get(Category::Power).is_none());
}

#[test]
fn test_transformer_without_communication() {
    let report = BatchRunner::new(AnalyzerConfig::default()).run(&survey());
    let pole = result(&report, "P-5");

    assert_eq!(pole.proposed_height, 266);
    assert_eq!(
        pole.reasons,
        vec!["PHOA is 8 inches above bottom of lowest transformer."]
    );
    let power = pole.outcomes.iter().find(|o| o.check == "lowest_power").unwrap();
    assert_eq!(power.diff, Some(118));
    assert!(power.status.is_clear());
}

#[test]
fn test_communication_above_power() {
    let report = BatchRunner::new(AnalyzerConfig::default()).run(&survey());
    let pole = result(&report, "P-6");

    assert_eq!(pole.proposed_height, 372);
    assert_eq!(pole.reasons, vec!["PHOA is 72 inches above lowest power."]);
}

#[test]
fn test_rejected_row_is_reported() {
    let report = BatchRunner::new(AnalyzerConfig::default()).run(&survey());

    assert_eq!(report.metrics.total_poles, 5);
    assert_eq!(report.metrics.rejected_rows, 1);
    assert_eq!(report.rejected[0].row, 4);
    assert_eq!(report.rejected[0].mr_text(), "Not analyzed: Row 4 has no pole handle");
}

#[test]
fn test_metrics_by_check() {
    let report = BatchRunner::new(AnalyzerConfig::default()).run(&survey());

    assert_eq!(report.metrics.make_ready_poles, 4);
    assert_eq!(report.metrics.clear_poles, 1);
    assert_eq!(report.metrics.reasons_by_check.get("lowest_power"), Some(&2));
    assert_eq!(report.metrics.reasons_by_check.get("pole_top"), Some(&1));
    assert_eq!(report.metrics.reasons_by_check.get("transformer_bottom"), Some(&1));
}

#[test]
fn test_relaxed_clearances_clear_the_pole() {
    let clearance = ClearanceConfig::default()
        .with_power_clearance(10)
        .with_circuit_clearance(6)
        .with_streetlight_bottom_clearance(0);
    let analyzer = PoleAnalyzer::new(clearance);

    let report = BatchRunner::new(AnalyzerConfig::default())
        .with_analyzer(analyzer)
        .run(&survey());

    assert!(!result(&report, "P-2").needs_make_ready);
}

#[test]
fn test_default_config_matches_unconfigured_analysis() {
    let pole = RawRecord::builder("J-1")
        .cell("TYPE", "JNT")
        .cell("LWSTPWR", "PWR 21 0")
        .cell("BLNK", "TRANS BTM 21 6/STLT DL 20 0")
        .cell("STLT", "BTM 19 8")
        .cell("CATV", "CATV 18 6")
        .build();
    let unconfigured = PoleAnalyzer::default().analyze(&pole);
    let configured = PoleAnalyzer::new(ClearanceConfig::from_toml_str("").unwrap()).analyze(&pole);
    assert_eq!(unconfigured, configured);
}

#[tokio::test]
async fn test_parallel_run_on_survey_table() {
    let table = generated_table(1_000);
    let runner = BatchRunner::new(AnalyzerConfig::default().with_max_concurrency(8));

    let sequential = runner.run(&table);
    let parallel = runner.run_parallel(&table).await.unwrap();

    assert_eq!(parallel.results.len(), 1_000);
    assert_eq!(sequential.results, parallel.results);
    assert_eq!(parallel.metrics.make_ready_poles, 250);
    assert!(parallel
        .results
        .windows(2)
        .all(|pair| pair[0].pole_handle < pair[1].pole_handle));
}
