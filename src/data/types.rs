//! 仪表盘数据结构

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 核心指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_revenue: f64,
    pub new_customers: u64,
    pub active_accounts: u64,
    pub growth_rate: f64,
    pub active_users: u64,
}

/// 月度收入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// 月份缩写（Jan..Dec）
    pub name: String,
    pub total: u64,
}

/// 最近销售记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub name: String,
    pub email: String,
    /// 货币文本，如 `+$1999.00`
    pub amount: String,
    pub avatar: String,
}

/// 渠道流量统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelStat {
    pub name: String,
    pub visitors: u64,
    pub percentage: f64,
    pub change: String,
}

/// 活动流条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub user: String,
    pub action: String,
    pub time: String,
    pub avatar: String,
}

/// 日流量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficPoint {
    pub date: NaiveDate,
    pub visitors: u64,
}

/// 占比分布（流量来源、设备、年龄段）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub name: String,
    pub value: u64,
}

/// 转化漏斗阶段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub stage: String,
    pub value: u64,
}

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Celebration,
    Warning,
    Info,
}

/// 通知
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

/// 一次完整生成的仪表盘数据（生成后不再修改）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub metrics: DashboardMetrics,
    pub revenue_data: Vec<RevenuePoint>,
    pub recent_sales: Vec<Sale>,
    pub top_channels: Vec<ChannelStat>,
    pub activity_feed: Vec<ActivityEvent>,
    pub traffic_data: Vec<TrafficPoint>,
    pub traffic_sources: Vec<Share>,
    pub conversion_funnel: Vec<FunnelStage>,
    pub age_distribution: Vec<Share>,
    pub device_types: Vec<Share>,
    pub notifications: Vec<Notification>,
}

impl Snapshot {
    /// 落在日期区间（含两端）内的流量数据
    pub fn traffic_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&TrafficPoint> {
        self.traffic_data
            .iter()
            .filter(|p| p.date >= from && p.date <= to)
            .collect()
    }
}
