//! 导出与报表测试

use adb_insights::export::{self, to_csv, to_json};
use adb_insights::{DataGenerator, DateRange, ExportFormat, FixedClock, Report, ReportType, SignalCache, Snapshot};
use chrono::NaiveDate;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn snapshot() -> Snapshot {
    let clock = FixedClock::at(NaiveDate::from_ymd_opt(2024, 8, 2).unwrap(), 16);
    DataGenerator::with_parts(SignalCache::new(), Arc::new(clock), Some(42)).generate(Some("1"))
}

#[test]
fn test_csv_sections_and_layout() {
    let snapshot = snapshot();
    let csv = to_csv(&snapshot);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "Metrics");
    assert_eq!(lines[1], "Total Revenue,New Customers,Active Accounts,Growth Rate,Active Users");
    assert_eq!(lines[2].split(',').count(), 5);
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "Monthly Revenue");
    assert_eq!(lines[5], "Month,Revenue");
    assert_eq!(lines[6], format!("Jan,{}", snapshot.revenue_data[0].total));
    assert_eq!(lines[17], format!("Dec,{}", snapshot.revenue_data[11].total));
    assert_eq!(lines[18], "");
    assert_eq!(lines[19], "Recent Sales");
    assert_eq!(lines[20], "Name,Email,Amount");
    assert_eq!(lines.len(), 21 + 5);

    let first_sale = &snapshot.recent_sales[0];
    assert_eq!(
        lines[21],
        format!("{},{},{}", first_sale.name, first_sale.email, first_sale.amount)
    );
}

#[test]
fn test_json_round_trips_snapshot() {
    let snapshot = snapshot();
    let json = to_json(&snapshot).unwrap();
    assert!(json.contains("\n  \"metrics\": {"));
    let parsed: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.revenue_data, snapshot.revenue_data);
    assert_eq!(parsed.recent_sales, snapshot.recent_sales);
    assert_eq!(parsed.traffic_data, snapshot.traffic_data);
    assert_eq!(parsed.notifications, snapshot.notifications);
    assert_eq!(parsed.metrics.active_accounts, snapshot.metrics.active_accounts);
}

#[test]
fn test_write_export_files() {
    let dir = TempDir::new().unwrap();
    let snapshot = snapshot();

    let csv_path = export::write_export(&snapshot, ExportFormat::Csv, dir.path()).unwrap();
    assert_eq!(csv_path.file_name().unwrap(), "dashboard-data.csv");
    assert!(fs::read_to_string(&csv_path).unwrap().starts_with("Metrics"));

    let json_path = export::write_export(&snapshot, ExportFormat::Json, dir.path()).unwrap();
    assert_eq!(json_path.file_name().unwrap(), "dashboard-data.json");
}

#[test]
fn test_report_with_date_range() {
    let dir = TempDir::new().unwrap();
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 7, 31).unwrap(),
    )
    .unwrap();
    let snapshot = snapshot();
    let report = Report::build(ReportType::Monthly, None, &snapshot, Some(range));

    assert_eq!(report.team, "Default Team");
    assert_eq!(report.period, "07/01/2024 to 07/31/2024");
    assert_eq!(report.metrics, snapshot.metrics);
    assert!(report.file_name().starts_with("monthly-report-"));

    let path = report.write_to(dir.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(value["reportType"], "monthly");
    assert!(value["metrics"]["activeUsers"].is_number());
}

#[test]
fn test_traffic_between_filters_snapshot() {
    let snapshot = snapshot();
    let range = DateRange::last_days(7, NaiveDate::from_ymd_opt(2024, 8, 2).unwrap());
    let points = snapshot.traffic_between(range.from, range.to);
    assert_eq!(points.len(), 7);
    assert!(points.iter().all(|p| range.contains(p.date)));
}
