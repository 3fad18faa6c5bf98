//! Team 数据模型

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// 订阅计划
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
    Enterprise,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
            Plan::Enterprise => "enterprise",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "pro" => Ok(Plan::Pro),
            "enterprise" => Ok(Plan::Enterprise),
            other => Err(format!("unknown plan '{}'", other)),
        }
    }
}

/// Team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    /// 内部标识（名称的 slug）
    pub value: String,
    pub plan: Plan,
    pub members: u32,
    pub created_at: DateTime<Utc>,
}

/// Team 局部更新
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub plan: Option<Plan>,
    pub members: Option<u32>,
}

impl TeamUpdate {
    pub fn plan(plan: Plan) -> Self {
        Self {
            plan: Some(plan),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.plan.is_none() && self.members.is_none()
    }
}

/// 名称转 slug：小写，连续空白替换为 `-`
pub fn slugify(name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));
    re.replace_all(&name.trim().to_lowercase(), "-").into_owned()
}

fn created(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

/// 内置默认 team 列表
pub fn default_teams() -> Vec<Team> {
    vec![
        Team {
            id: "1".to_string(),
            name: "ADB Insights".to_string(),
            value: "personal".to_string(),
            plan: Plan::Pro,
            members: 1,
            created_at: created(2024, 1, 1),
        },
        Team {
            id: "2".to_string(),
            name: "Marketing Team".to_string(),
            value: "marketing".to_string(),
            plan: Plan::Enterprise,
            members: 12,
            created_at: created(2024, 2, 15),
        },
        Team {
            id: "3".to_string(),
            name: "Analytics Team".to_string(),
            value: "analytics".to_string(),
            plan: Plan::Pro,
            members: 8,
            created_at: created(2024, 3, 10),
        },
    ]
}
