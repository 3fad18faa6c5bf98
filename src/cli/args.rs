//! 命令参数

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use crate::export::ExportFormat;
use crate::report::{DateRange, ReportType};
use crate::team::Plan;

/// Export 命令参数
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// 导出格式
    #[arg(long, short, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// 输出目录（默认当前目录）
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// 只打印到标准输出，不写文件
    #[arg(long)]
    pub stdout: bool,
}

/// Report 命令参数
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// 报表类型
    #[arg(value_enum)]
    pub report_type: ReportType,

    /// 起始日期 (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,

    /// 结束日期 (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,

    /// 输出目录（默认当前目录）
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    pub fn date_range(&self) -> Result<Option<DateRange>> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Ok(Some(DateRange::new(from, to)?)),
            (None, None) => Ok(None),
            _ => Err(anyhow!("--from 和 --to 需要同时指定")),
        }
    }
}

/// TeamUpdate 命令参数
#[derive(Args, Debug)]
pub struct TeamUpdateArgs {
    /// Team ID
    pub id: String,

    /// 新名称
    #[arg(long)]
    pub name: Option<String>,

    /// 新订阅计划
    #[arg(long, value_enum)]
    pub plan: Option<Plan>,

    /// 成员数
    #[arg(long)]
    pub members: Option<u32>,
}
