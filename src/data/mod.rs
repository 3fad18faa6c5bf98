//! Data 模块 - 仪表盘快照的数据结构与生成
//!
//! ## 子模块
//!
//! - `types` - 快照及其组成部分
//! - `profile` - Team 倍率和时段系数
//! - `templates` - 名单、动作、通知等静态模板池
//! - `generator` - 快照生成器

pub mod types;
pub mod profile;
pub mod templates;
pub mod generator;

pub use types::{
    ActivityEvent, ChannelStat, DashboardMetrics, FunnelStage, Notification, NotificationKind,
    RevenuePoint, Sale, Share, Snapshot, TrafficPoint,
};
pub use profile::{time_of_day_variation, TeamMultiplier};
pub use generator::{DataGenerator, BASE_METRICS, DEFAULT_PRICE_REFERENCE};
