//! ADB Insights - 营销分析仪表盘的数据模拟核心

pub mod broadcast;
pub mod cli;
pub mod clock;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod format;
pub mod report;
pub mod service;
pub mod signal;
pub mod team;

pub use broadcast::{Broadcaster, Subscription, SubscriptionId};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::DashboardConfig;
pub use data::{DataGenerator, Snapshot, TeamMultiplier};
pub use error::DashboardError;
pub use export::ExportFormat;
pub use format::{format_currency, format_percentage};
pub use report::{DateRange, Report, ReportType};
pub use service::{DashboardService, ServiceHandle};
pub use signal::{Endpoint, ExternalSignal, SignalCache, SignalFetcher};
pub use team::{Plan, Team, TeamContext, TeamStore, TeamUpdate};
