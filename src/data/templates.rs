//! 静态模板池 - 生成器从这里抽样

use super::types::{FunnelStage, NotificationKind, Share};

/// 默认头像
pub const PLACEHOLDER_AVATAR: &str = "/placeholder.svg?height=32&width=32";

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 无外部用户数据时的销售客户名单
pub const SALE_NAMES: [&str; 10] = [
    "Emma Johnson",
    "Liam Smith",
    "Olivia Brown",
    "Noah Davis",
    "Ava Wilson",
    "Ethan Moore",
    "Sophia Taylor",
    "Mason Anderson",
    "Isabella Garcia",
    "Jacob Martinez",
];

/// 无外部目录数据时的活动用户名单
pub const ACTIVITY_USERS: [&str; 5] = [
    "John Doe",
    "Sarah Wilson",
    "Mike Johnson",
    "Emily Brown",
    "David Lee",
];

pub const ACTIVITY_ACTIONS: [&str; 12] = [
    "created a new campaign",
    "updated customer profile",
    "completed a purchase",
    "left a product review",
    "subscribed to newsletter",
    "cancelled subscription",
    "updated payment method",
    "downloaded report",
    "shared content on social media",
    "attended webinar",
    "updated billing information",
    "requested support",
];

/// (名称, 访客数, 占比, 环比)
pub const CHANNELS: [(&str, u64, f64, &str); 4] = [
    ("Organic Search", 4520, 45.2, "+12.5%"),
    ("Direct Traffic", 2850, 28.5, "+8.2%"),
    ("Social Media", 1680, 16.8, "+15.3%"),
    ("Email Marketing", 950, 9.5, "+5.1%"),
];

/// (标题, 描述, 类型)
pub const NOTIFICATIONS: [(&str, &str, NotificationKind); 5] = [
    (
        "New customer signed up",
        "A new customer has joined your platform",
        NotificationKind::Success,
    ),
    (
        "Revenue milestone reached",
        "Congratulations! You've reached $50K in monthly revenue",
        NotificationKind::Celebration,
    ),
    (
        "Low inventory alert",
        "Product \"ADmyBRAND Premium\" is running low on stock",
        NotificationKind::Warning,
    ),
    (
        "Campaign performance update",
        "Your latest campaign achieved 125% of target conversions",
        NotificationKind::Info,
    ),
    (
        "System maintenance scheduled",
        "Scheduled maintenance on Feb 1st from 2:00 AM to 4:00 AM",
        NotificationKind::Info,
    ),
];

fn shares(items: &[(&str, u64)]) -> Vec<Share> {
    items
        .iter()
        .map(|(name, value)| Share {
            name: name.to_string(),
            value: *value,
        })
        .collect()
}

pub fn traffic_sources() -> Vec<Share> {
    shares(&[
        ("Organic Search", 45),
        ("Direct", 28),
        ("Social Media", 17),
        ("Email", 10),
    ])
}

pub fn device_types() -> Vec<Share> {
    shares(&[("Desktop", 58), ("Mobile", 35), ("Tablet", 7)])
}

pub fn age_distribution() -> Vec<Share> {
    shares(&[
        ("18-24", 18),
        ("25-34", 34),
        ("35-44", 26),
        ("45-54", 14),
        ("55+", 8),
    ])
}

pub fn conversion_funnel() -> Vec<FunnelStage> {
    [
        ("Visitors", 10000),
        ("Leads", 2500),
        ("Qualified", 1200),
        ("Customers", 450),
    ]
    .iter()
    .map(|(stage, value)| FunnelStage {
        stage: stage.to_string(),
        value: *value,
    })
    .collect()
}
