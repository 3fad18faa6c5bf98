//! Output formatting for CLI commands

use serde::Serialize;
use std::collections::BTreeMap;

use crate::data::Snapshot;
use crate::format::{format_currency, format_percentage};
use crate::team::Team;

/// Format output as pretty JSON
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// 快照摘要（多行）
pub fn format_snapshot(snapshot: &Snapshot, team_name: &str) -> String {
    let m = &snapshot.metrics;
    let mut out = vec![
        format!("Team: {}", team_name),
        format!("  Total Revenue:   {}", format_currency(m.total_revenue)),
        format!("  New Customers:   {}", m.new_customers),
        format!("  Active Accounts: {}", m.active_accounts),
        format!("  Growth Rate:     {}", format_percentage(m.growth_rate)),
        format!("  Active Users:    {}", m.active_users),
        String::new(),
        "Recent Sales:".to_string(),
    ];
    for sale in &snapshot.recent_sales {
        out.push(format!("  {:<20} {:<32} {}", sale.name, sale.email, sale.amount));
    }
    out.push(String::new());
    out.push("Activity:".to_string());
    for event in snapshot.activity_feed.iter().take(5) {
        out.push(format!("  {} {} ({})", event.user, event.action, event.time));
    }
    out.join("\n")
}

/// 单行快照摘要（watch 模式）
pub fn format_snapshot_line(snapshot: &Snapshot) -> String {
    let m = &snapshot.metrics;
    format!(
        "[{}] revenue {} | customers {} | accounts {} | growth {} | users {}",
        snapshot.generated_at.format("%H:%M:%S"),
        format_currency(m.total_revenue),
        m.new_customers,
        m.active_accounts,
        format_percentage(m.growth_rate),
        m.active_users
    )
}

/// Team 列表，选中的 team 用 `*` 标记
pub fn format_teams(teams: &[Team], selected_id: &str) -> String {
    teams
        .iter()
        .map(|t| {
            let marker = if t.id == selected_id { "*" } else { " " };
            format!(
                "{} {} | {} | {} | 成员: {} | 创建于: {}",
                marker,
                t.id,
                t.name,
                t.plan,
                t.members,
                t.created_at.format("%Y-%m-%d")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 连通性结果
pub fn format_connectivity(status: &BTreeMap<String, bool>) -> String {
    let ok = status.values().filter(|v| **v).count();
    let mut lines: Vec<String> = status
        .iter()
        .map(|(name, up)| format!("  {:<16} {}", name, if *up { "✅ ok" } else { "❌ failed" }))
        .collect();
    lines.push(format!("{}/{} APIs are responding", ok, status.len()));
    lines.join("\n")
}
