//! 报表 - 基于当前快照生成 monthly / customer / revenue 报表

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::data::{DashboardMetrics, Snapshot};

/// 未指定日期区间时的周期描述
pub const DEFAULT_PERIOD: &str = "Last 30 days";

/// 报表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Monthly,
    Customer,
    Revenue,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Monthly => "monthly",
            ReportType::Customer => "customer",
            ReportType::Revenue => "revenue",
        }
    }
}

/// 日期区间（含两端）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(anyhow!("date range start {} is after end {}", from, to));
        }
        Ok(Self { from, to })
    }

    /// 截止到 `today` 的最近 `days` 天
    pub fn last_days(days: i64, today: NaiveDate) -> Self {
        Self {
            from: today - Duration::days(days.max(1) - 1),
            to: today,
        }
    }

    /// 形如 `01/15/2024 to 02/14/2024`
    pub fn label(&self) -> String {
        format!("{} to {}", self.from.format("%m/%d/%Y"), self.to.format("%m/%d/%Y"))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// 报表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub report_type: ReportType,
    pub generated_at: DateTime<Utc>,
    pub team: String,
    pub metrics: DashboardMetrics,
    pub period: String,
}

impl Report {
    /// 构建报表
    pub fn build(
        report_type: ReportType,
        team: Option<&str>,
        snapshot: &Snapshot,
        range: Option<DateRange>,
    ) -> Self {
        Self {
            report_type,
            generated_at: snapshot.generated_at,
            team: team.unwrap_or("Default Team").to_string(),
            metrics: snapshot.metrics.clone(),
            period: range.map(|r| r.label()).unwrap_or_else(|| DEFAULT_PERIOD.to_string()),
        }
    }

    /// 文件名：`<type>-report-<YYYY-MM-DD>.json`
    pub fn file_name(&self) -> String {
        format!(
            "{}-report-{}.json",
            self.report_type.as_str(),
            self.generated_at.format("%Y-%m-%d")
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 写入报表文件，返回路径
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.to_json()?)?;
        info!(path = %path.display(), report = self.report_type.as_str(), "Report generated");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_label_and_bounds() {
        let range = DateRange::new(date(2024, 1, 5), date(2024, 2, 4)).unwrap();
        assert_eq!(range.label(), "01/05/2024 to 02/04/2024");
        assert!(range.contains(date(2024, 1, 5)));
        assert!(!range.contains(date(2024, 2, 5)));
        assert!(DateRange::new(date(2024, 2, 4), date(2024, 1, 5)).is_err());
    }

    #[test]
    fn test_last_days() {
        let range = DateRange::last_days(30, date(2024, 3, 30));
        assert_eq!(range.from, date(2024, 3, 1));
        assert_eq!(range.to, date(2024, 3, 30));
    }
}
