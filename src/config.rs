//! 配置 - 轮询间隔、超时、外部接口表和数据目录
//!
//! 配置文件 `~/.config/adb-insights/config.json`（JSON，所有字段可省略）。
//! 文件不存在时使用默认值；文件无法解析时记录警告并使用默认值。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::data::DEFAULT_PRICE_REFERENCE;
use crate::signal::{default_endpoints, Endpoint, DEFAULT_FETCH_TIMEOUT_MS};
use crate::team::default_data_dir;

/// 配置文件名
pub const CONFIG_FILE: &str = "config.json";

/// 仪表盘配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 快照广播间隔（秒）
    pub broadcast_interval_secs: u64,
    /// 外部信号刷新间隔（秒）
    pub signal_refresh_secs: u64,
    /// 单个外部请求超时（毫秒）
    pub fetch_timeout_ms: u64,
    /// 首次加载的模拟延迟（毫秒）
    pub initial_delay_ms: u64,
    /// 价格信号参考值
    pub price_reference: f64,
    /// 数据目录（team 存储、导出文件）
    pub data_dir: Option<PathBuf>,
    /// 外部接口表
    pub endpoints: Vec<Endpoint>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            broadcast_interval_secs: 10,
            signal_refresh_secs: 300,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            initial_delay_ms: 1000,
            price_reference: DEFAULT_PRICE_REFERENCE,
            data_dir: None,
            endpoints: default_endpoints(),
        }
    }
}

impl DashboardConfig {
    /// 默认配置文件路径
    pub fn path() -> PathBuf {
        default_data_dir().join(CONFIG_FILE)
    }

    /// 从默认路径加载，出错时回退到默认配置
    pub fn load() -> Self {
        let path = Self::path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                Self::default()
            }
        }
    }

    /// 从指定路径加载；文件不存在时返回默认配置
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn broadcast_interval(&self) -> Duration {
        Duration::from_secs(self.broadcast_interval_secs.max(1))
    }

    pub fn signal_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.signal_refresh_secs.max(1))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms.max(1))
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// 实际使用的数据目录
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.broadcast_interval(), Duration::from_secs(10));
        assert_eq!(config.endpoints.len(), 6);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"broadcast_interval_secs": 2, "data_dir": "/tmp/adb"}"#).unwrap();

        let config = DashboardConfig::load_from(&path).unwrap();
        assert_eq!(config.broadcast_interval_secs, 2);
        assert_eq!(config.signal_refresh_secs, 300);
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/adb"));
    }

    #[test]
    fn test_zero_durations_are_clamped() {
        let config = DashboardConfig {
            broadcast_interval_secs: 0,
            signal_refresh_secs: 0,
            fetch_timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.broadcast_interval(), Duration::from_secs(1));
        assert_eq!(config.signal_refresh_interval(), Duration::from_secs(1));
        assert_eq!(config.fetch_timeout(), Duration::from_millis(1));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "broadcast_interval_secs = 2").unwrap();
        assert!(DashboardConfig::load_from(&path).is_err());
    }
}
