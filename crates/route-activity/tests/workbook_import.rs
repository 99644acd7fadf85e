use chrono::NaiveDate;
use route_activity::workflows::ingest::SpreadsheetLoader;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn visit_workbook_loads_with_renamed_headers_and_native_dates() {
    let loaded =
        SpreadsheetLoader::visits_from_path(fixture("visitas.xlsx")).expect("workbook loads");
    assert_eq!(loaded.skipped, 0);
    assert_eq!(loaded.records.len(), 2);

    let first = &loaded.records[0];
    assert_eq!(first.client_id.as_str(), "1001");
    assert_eq!(first.salesperson.as_str(), "Perez");
    assert_eq!(first.visited_on, NaiveDate::from_ymd_opt(2025, 12, 1));
    assert!(first.evidence.had_action());

    let second = &loaded.records[1];
    assert_eq!(second.client_id.as_str(), "1002");
    assert_eq!(second.visited_on, NaiveDate::from_ymd_opt(2025, 12, 2));
    assert!(!second.evidence.had_action());
}
