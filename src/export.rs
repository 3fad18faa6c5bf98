//! 导出 - 快照转 CSV / JSON
//!
//! CSV 由 `Metrics`、`Monthly Revenue`、`Recent Sales` 三段组成，
//! 每段是标题行、表头、数据行，段之间空一行。字段中的逗号不做转义。

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::data::Snapshot;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "dashboard-data.csv",
            ExportFormat::Json => "dashboard-data.json",
        }
    }
}

/// 渲染 CSV
pub fn to_csv(snapshot: &Snapshot) -> String {
    let m = &snapshot.metrics;
    let mut lines = vec![
        "Metrics".to_string(),
        "Total Revenue,New Customers,Active Accounts,Growth Rate,Active Users".to_string(),
        format!(
            "{},{},{},{},{}",
            m.total_revenue, m.new_customers, m.active_accounts, m.growth_rate, m.active_users
        ),
        String::new(),
        "Monthly Revenue".to_string(),
        "Month,Revenue".to_string(),
    ];
    lines.extend(
        snapshot
            .revenue_data
            .iter()
            .map(|p| format!("{},{}", p.name, p.total)),
    );
    lines.push(String::new());
    lines.push("Recent Sales".to_string());
    lines.push("Name,Email,Amount".to_string());
    lines.extend(
        snapshot
            .recent_sales
            .iter()
            .map(|s| format!("{},{},{}", s.name, s.email, s.amount)),
    );
    lines.join("\n")
}

/// 渲染格式化 JSON
pub fn to_json(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// 按格式渲染
pub fn render(snapshot: &Snapshot, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => Ok(to_csv(snapshot)),
        ExportFormat::Json => to_json(snapshot),
    }
}

/// 写入导出文件，返回文件路径
pub fn write_export(snapshot: &Snapshot, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format.file_name());
    fs::write(&path, render(snapshot, format)?)?;
    info!(path = %path.display(), format = ?format, "Dashboard data exported");
    Ok(path)
}
