//! Dashboard Service - 组合生成器、外部信号和广播器
//!
//! 由应用入口显式构造并按引用传递。`start` 启动两个互不依赖的定时任务：
//! - 每个广播间隔为当前 team 生成快照并分发给订阅者（与是否有订阅者无关）
//! - 启动时立即刷新外部信号，之后按刷新间隔重复
//!
//! 两个任务之间没有顺序保证，广播可能用到旧的或刚刷新的信号。

use anyhow::Result;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::broadcast::{Broadcaster, Subscription};
use crate::clock::{Clock, SystemClock};
use crate::config::DashboardConfig;
use crate::data::{DataGenerator, Snapshot};
use crate::export::{self, ExportFormat};
use crate::report::{DateRange, Report, ReportType};
use crate::signal::{SignalCache, SignalFetcher};

/// 仪表盘服务
pub struct DashboardService {
    config: DashboardConfig,
    generator: Arc<DataGenerator>,
    fetcher: Arc<SignalFetcher>,
    broadcaster: Arc<Broadcaster>,
    active_team: Arc<RwLock<Option<String>>>,
}

impl DashboardService {
    /// 使用系统时钟和系统熵创建服务
    pub fn new(config: DashboardConfig) -> Result<Self> {
        Self::with_parts(config, Arc::new(SystemClock), None)
    }

    /// 指定时钟和随机种子创建服务
    pub fn with_parts(
        config: DashboardConfig,
        clock: Arc<dyn Clock>,
        seed: Option<u64>,
    ) -> Result<Self> {
        let cache = SignalCache::new();
        let fetcher = SignalFetcher::new(
            config.endpoints.clone(),
            config.fetch_timeout(),
            cache.clone(),
        )?;
        let generator = DataGenerator::with_parts(cache, clock, seed)
            .with_price_reference(config.price_reference);

        Ok(Self {
            config,
            generator: Arc::new(generator),
            fetcher: Arc::new(fetcher),
            broadcaster: Arc::new(Broadcaster::new()),
            active_team: Arc::new(RwLock::new(None)),
        })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// 设置定时广播使用的 team
    pub fn set_active_team(&self, team_id: Option<&str>) {
        let mut guard = match self.active_team.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = team_id.map(|s| s.to_string());
        debug!(team_id = team_id.unwrap_or("default"), "Active team changed");
    }

    pub fn active_team(&self) -> Option<String> {
        read_active(&self.active_team)
    }

    /// 立即生成一份快照
    pub fn snapshot(&self, team_id: Option<&str>) -> Snapshot {
        self.generator.generate(team_id)
    }

    /// 首次加载：等待配置的模拟延迟后生成
    pub async fn initial_snapshot(&self, team_id: Option<&str>) -> Snapshot {
        let delay = self.config.initial_delay();
        if !delay.is_zero() {
            time::sleep(delay).await;
        }
        self.snapshot(team_id)
    }

    /// 订阅快照更新
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Arc<Snapshot>) + Send + Sync + 'static,
    {
        self.broadcaster.subscribe(callback)
    }

    /// 立即为当前 team 生成并广播一次，返回送达次数
    pub fn publish_now(&self) -> usize {
        let team = self.active_team();
        let snapshot = Arc::new(self.generator.generate(team.as_deref()));
        self.broadcaster.publish(snapshot)
    }

    /// 刷新外部信号
    pub async fn refresh_signals(&self) -> usize {
        self.fetcher.refresh().await
    }

    /// 外部接口连通性诊断
    pub async fn test_connectivity(&self) -> BTreeMap<String, bool> {
        self.fetcher.test_connectivity().await
    }

    /// 是否已拿到任何外部数据
    pub fn is_connected(&self) -> bool {
        self.fetcher.is_connected()
    }

    /// 为当前 team 生成新快照并导出
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        let team = self.active_team();
        export::render(&self.generator.generate(team.as_deref()), format)
    }

    /// 为当前 team 生成报表
    pub fn report(
        &self,
        report_type: ReportType,
        team_name: Option<&str>,
        range: Option<DateRange>,
    ) -> Report {
        let team = self.active_team();
        let snapshot = self.generator.generate(team.as_deref());
        Report::build(report_type, team_name, &snapshot, range)
    }

    /// 启动定时广播和外部信号刷新
    pub fn start(&self) -> ServiceHandle {
        let broadcast_every = self.config.broadcast_interval();
        let refresh_every = self.config.signal_refresh_interval();

        let generator = Arc::clone(&self.generator);
        let broadcaster = Arc::clone(&self.broadcaster);
        let active_team = Arc::clone(&self.active_team);
        let broadcast_task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + broadcast_every, broadcast_every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let team = read_active(&active_team);
                let snapshot = Arc::new(generator.generate(team.as_deref()));
                let delivered = broadcaster.publish(snapshot);
                debug!(delivered, "Periodic snapshot broadcast");
            }
        });

        let fetcher = Arc::clone(&self.fetcher);
        let refresh_task = tokio::spawn(async move {
            let mut ticker = time::interval(refresh_every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                fetcher.refresh().await;
            }
        });

        info!(
            broadcast_secs = broadcast_every.as_secs(),
            refresh_secs = refresh_every.as_secs(),
            "Dashboard service started"
        );

        ServiceHandle {
            tasks: vec![broadcast_task, refresh_task],
        }
    }
}

fn read_active(active: &RwLock<Option<String>>) -> Option<String> {
    match active.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// 后台任务句柄，drop 或 `shutdown` 时停止定时任务
pub struct ServiceHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl ServiceHandle {
    pub fn shutdown(self) {
        drop(self);
    }

    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|t| !t.is_finished())
    }
}

impl Drop for ServiceHandle {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
        debug!("Dashboard service stopped");
    }
}
