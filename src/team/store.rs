//! Team 持久化 - 数据目录下的两个 JSON 文件
//!
//! - `dashboard-teams.json` - team 列表（`createdAt` 为 ISO-8601 字符串）
//! - `dashboard-selected-team.json` - 选中 team 的 id（JSON 字符串）

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::model::Team;
use crate::error::DashboardError;

pub const TEAMS_FILE: &str = "dashboard-teams.json";
pub const SELECTED_FILE: &str = "dashboard-selected-team.json";

/// 从磁盘读出的状态
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTeams {
    pub teams: Vec<Team>,
    pub selected_id: Option<String>,
}

/// Team 存储
#[derive(Debug, Clone)]
pub struct TeamStore {
    dir: PathBuf,
}

impl TeamStore {
    /// 使用默认数据目录 `~/.config/adb-insights`
    pub fn new() -> Self {
        Self { dir: default_data_dir() }
    }

    /// 使用自定义目录（测试用）
    pub fn new_with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn teams_path(&self) -> PathBuf {
        self.dir.join(TEAMS_FILE)
    }

    fn selected_path(&self) -> PathBuf {
        self.dir.join(SELECTED_FILE)
    }

    /// 读取状态；没有保存过时返回 `Ok(None)`
    pub fn load(&self) -> Result<Option<StoredTeams>, DashboardError> {
        let teams_path = self.teams_path();
        if !teams_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&teams_path)
            .map_err(|e| DashboardError::StorageCorrupt(format!("{}: {}", teams_path.display(), e)))?;
        let teams: Vec<Team> = serde_json::from_str(&content)
            .map_err(|e| DashboardError::StorageCorrupt(format!("{}: {}", teams_path.display(), e)))?;

        // 选中 id 损坏不影响 team 列表
        let selected_id = fs::read_to_string(self.selected_path())
            .ok()
            .and_then(|s| serde_json::from_str::<String>(&s).ok());

        Ok(Some(StoredTeams { teams, selected_id }))
    }

    /// 保存 team 列表和选中 id
    pub fn save(&self, teams: &[Team], selected_id: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        write_locked(&self.teams_path(), &serde_json::to_string_pretty(teams)?)?;
        write_locked(&self.selected_path(), &serde_json::to_string(selected_id)?)?;
        Ok(())
    }
}

impl Default for TeamStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 默认数据目录
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("adb-insights")
}

/// 加独占锁后整体覆盖写入
fn write_locked(path: &Path, content: &str) -> Result<()> {
    use fs2::FileExt;

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)?;

    file.lock_exclusive()?;
    file.set_len(0)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    file.unlock()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::model::default_teams;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = TeamStore::new_with_dir(dir.path());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = TeamStore::new_with_dir(dir.path().join("nested"));
        let teams = default_teams();
        store.save(&teams, "2").unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.teams, teams);
        assert_eq!(loaded.selected_id.as_deref(), Some("2"));
    }

    #[test]
    fn test_shorter_rewrite_leaves_no_trailing_bytes() {
        let dir = TempDir::new().unwrap();
        let store = TeamStore::new_with_dir(dir.path());
        let teams = default_teams();
        store.save(&teams, "1").unwrap();
        store.save(&teams[..1], "1").unwrap();

        assert_eq!(store.load().unwrap().unwrap().teams.len(), 1);
    }

    #[test]
    fn test_corrupt_teams_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TEAMS_FILE), "{not json").unwrap();
        let store = TeamStore::new_with_dir(dir.path());
        assert!(matches!(store.load(), Err(DashboardError::StorageCorrupt(_))));
    }

    #[test]
    fn test_corrupt_selected_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let store = TeamStore::new_with_dir(dir.path());
        store.save(&default_teams(), "3").unwrap();
        fs::write(dir.path().join(SELECTED_FILE), "3").unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.selected_id, None);
    }
}
