//! ADB Insights CLI
//!
//! 生成模拟的营销分析数据、订阅实时更新、管理 team、导出报表

use adb_insights::{
    cli::{self, ExportArgs, ReportArgs, TeamUpdateArgs},
    export, DashboardConfig, DashboardService, Plan, TeamContext, TeamStore, TeamUpdate,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "adb")]
#[command(about = "ADB Insights - 营销分析仪表盘数据模拟")]
#[command(version)]
struct Cli {
    /// 数据目录（覆盖配置文件）
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 为当前 team 生成一份快照
    Snapshot {
        /// 指定 team ID（默认当前选中的 team）
        #[arg(long, short)]
        team: Option<String>,
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 订阅实时更新并打印
    Watch {
        /// 广播间隔（秒，覆盖配置）
        #[arg(long, short)]
        interval: Option<u64>,
        /// 收到 N 次更新后退出
        #[arg(long, short, value_parser = clap::value_parser!(u64).range(1..))]
        count: Option<u64>,
    },
    /// 导出当前 team 的数据
    Export(ExportArgs),
    /// 生成报表
    Report(ReportArgs),
    /// 测试外部接口连通性
    Connectivity {
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 列出所有 team
    Teams {
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 创建 team 并切换到新 team
    TeamCreate {
        /// Team 名称
        name: String,
        /// 订阅计划
        #[arg(long, value_enum, default_value = "free")]
        plan: Plan,
    },
    /// 切换当前 team
    TeamSwitch {
        /// Team ID
        id: String,
    },
    /// 更新 team
    TeamUpdate(TeamUpdateArgs),
    /// 删除 team
    TeamDelete {
        /// Team ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("adb_insights=info,adb=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    let mut config = DashboardConfig::load();
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    let mut teams = TeamContext::load(TeamStore::new_with_dir(config.data_dir()));

    match cli.command {
        Commands::Snapshot { team, json } => {
            let service = DashboardService::new(config)?;
            service.refresh_signals().await;

            let team_id = team.unwrap_or_else(|| teams.selected_id().to_string());
            let team_name = teams
                .find(&team_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| "Default Team".to_string());
            let snapshot = service.initial_snapshot(Some(&team_id)).await;

            if json {
                println!("{}", cli::format_json(&snapshot));
            } else {
                println!("{}", cli::format_snapshot(&snapshot, &team_name));
            }
        }
        Commands::Watch { interval, count } => {
            if let Some(secs) = interval {
                config.broadcast_interval_secs = secs;
            }
            let service = DashboardService::new(config)?;
            let selected = teams.selected();
            service.set_active_team(Some(&selected.id));
            println!("开始监控 Team '{}' (间隔: {}秒)", selected.name, service.config().broadcast_interval_secs);

            let (tx, mut rx) = mpsc::unbounded_channel();
            let subscription = service.subscribe(move |snapshot| {
                let _ = tx.send(snapshot);
            });
            let handle = service.start();

            let mut received = 0u64;
            loop {
                tokio::select! {
                    Some(snapshot) = rx.recv() => {
                        println!("{}", cli::format_snapshot_line(&snapshot));
                        received += 1;
                        if count.is_some_and(|n| received >= n) {
                            break;
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        info!("Interrupted");
                        break;
                    }
                }
            }

            subscription.unsubscribe();
            handle.shutdown();
        }
        Commands::Export(args) => {
            let service = DashboardService::new(config)?;
            service.set_active_team(Some(teams.selected_id()));
            service.refresh_signals().await;

            if args.stdout {
                println!("{}", service.export(args.format)?);
            } else {
                let team = teams.selected_id().to_string();
                let snapshot = service.snapshot(Some(&team));
                let dir = args.output.unwrap_or_else(|| PathBuf::from("."));
                let path = export::write_export(&snapshot, args.format, &dir)?;
                println!("已导出: {}", path.display());
            }
        }
        Commands::Report(args) => {
            let range = args.date_range()?;
            let service = DashboardService::new(config)?;
            let selected = teams.selected();
            service.set_active_team(Some(&selected.id));

            let report = service.report(args.report_type, Some(&selected.name), range);
            let dir = args.output.unwrap_or_else(|| PathBuf::from("."));
            let path = report.write_to(&dir)?;
            println!("已生成报表: {}", path.display());
        }
        Commands::Connectivity { json } => {
            let service = DashboardService::new(config)?;
            let status = service.test_connectivity().await;
            if json {
                println!("{}", cli::format_json(&status));
            } else {
                println!("{}", cli::format_connectivity(&status));
            }
        }
        Commands::Teams { json } => {
            if json {
                println!("{}", cli::format_json(&teams.teams()));
            } else {
                println!("{}", cli::format_teams(teams.teams(), teams.selected_id()));
            }
        }
        Commands::TeamCreate { name, plan } => {
            let team = teams.create(&name, plan)?;
            println!("已创建 Team '{}' (id: {}, 计划: {})", team.name, team.id, team.plan);
        }
        Commands::TeamSwitch { id } => {
            let team = teams.switch(&id)?;
            println!("已切换到 Team '{}'", team.name);
        }
        Commands::TeamUpdate(args) => {
            let update = TeamUpdate {
                name: args.name,
                plan: args.plan,
                members: args.members,
            };
            if update.is_empty() {
                warn!("Nothing to update");
                return Ok(());
            }
            let team = teams.update(&args.id, update)?;
            println!("已更新 Team '{}' (计划: {}, 成员: {})", team.name, team.plan, team.members);
        }
        Commands::TeamDelete { id } => {
            teams.delete(&id)?;
            println!("已删除 Team {}，当前 Team: {}", id, teams.selected().name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_count_must_be_positive() {
        assert!(Cli::try_parse_from(["adb", "watch", "--count", "0"]).is_err());

        let cli = Cli::try_parse_from(["adb", "watch", "--count", "2"]).unwrap();
        assert!(matches!(cli.command, Commands::Watch { count: Some(2), .. }));
    }
}
