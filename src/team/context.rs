//! Team Context - team 列表和当前选中 team 的状态机
//!
//! 选中状态按 id 保存，读取时从列表中查找，因此更新 team 之后
//! 不会读到旧的 team 数据。每次修改后都会把完整列表和选中 id 写回存储，
//! 写入失败只记录日志，内存状态仍然有效。

use chrono::Utc;
use tracing::{info, warn};

use super::model::{default_teams, slugify, Plan, Team, TeamUpdate};
use super::store::TeamStore;
use crate::error::DashboardError;

/// Team 状态管理器
pub struct TeamContext {
    store: TeamStore,
    teams: Vec<Team>,
    selected_id: String,
}

impl TeamContext {
    /// 从存储加载；没有保存过或数据损坏时使用默认 team
    pub fn load(store: TeamStore) -> Self {
        let stored = match store.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Team storage unreadable, resetting to defaults");
                None
            }
        };

        let (teams, selected_id) = match stored {
            Some(s) if !s.teams.is_empty() => (s.teams, s.selected_id),
            Some(_) => {
                warn!("Stored team list is empty, using defaults");
                (default_teams(), None)
            }
            None => (default_teams(), None),
        };

        let selected_id = selected_id
            .filter(|id| teams.iter().any(|t| &t.id == id))
            .unwrap_or_else(|| teams[0].id.clone());

        info!(teams = teams.len(), selected = %selected_id, "Team context loaded");

        Self {
            store,
            teams,
            selected_id,
        }
    }

    /// 所有 team（按列表顺序）
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// 当前选中的 team
    pub fn selected(&self) -> &Team {
        self.find(&self.selected_id).unwrap_or(&self.teams[0])
    }

    pub fn selected_id(&self) -> &str {
        &self.selected().id
    }

    pub fn find(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// 创建 team 并自动选中
    pub fn create(&mut self, name: &str, plan: Plan) -> Result<&Team, DashboardError> {
        let name = validate_name(name)?;

        let mut id_num = Utc::now().timestamp_millis();
        while self.find(&id_num.to_string()).is_some() {
            id_num += 1;
        }

        let team = Team {
            id: id_num.to_string(),
            value: slugify(&name),
            name,
            plan,
            members: 1,
            created_at: Utc::now(),
        };

        info!(team_id = %team.id, name = %team.name, plan = %plan, "Team created");
        self.selected_id = team.id.clone();
        self.teams.push(team);
        self.persist();

        Ok(self.selected())
    }

    /// 切换选中 team
    pub fn switch(&mut self, id: &str) -> Result<&Team, DashboardError> {
        if self.find(id).is_none() {
            return Err(DashboardError::TeamNotFound(id.to_string()));
        }
        self.selected_id = id.to_string();
        self.persist();
        info!(team_id = %id, "Switched team");
        Ok(self.selected())
    }

    /// 合并字段到指定 team
    pub fn update(&mut self, id: &str, update: TeamUpdate) -> Result<&Team, DashboardError> {
        let name = update.name.as_deref().map(validate_name).transpose()?;

        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DashboardError::TeamNotFound(id.to_string()))?;

        if let Some(name) = name {
            team.name = name;
        }
        if let Some(plan) = update.plan {
            team.plan = plan;
        }
        if let Some(members) = update.members {
            team.members = members;
        }

        self.persist();
        info!(team_id = %id, "Team updated");
        self.find(id).ok_or_else(|| DashboardError::TeamNotFound(id.to_string()))
    }

    /// 删除 team；不能删除最后一个
    pub fn delete(&mut self, id: &str) -> Result<(), DashboardError> {
        if self.teams.len() <= 1 {
            return Err(DashboardError::LastTeam);
        }
        let index = self
            .teams
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| DashboardError::TeamNotFound(id.to_string()))?;

        let removed = self.teams.remove(index);
        if self.selected_id == removed.id {
            self.selected_id = self.teams[0].id.clone();
        }

        self.persist();
        info!(team_id = %id, selected = %self.selected_id, "Team deleted");
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.teams, &self.selected_id) {
            warn!(error = %e, dir = %self.store.dir().display(), "Failed to persist teams");
        }
    }
}

fn validate_name(name: &str) -> Result<String, DashboardError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DashboardError::Validation(
            "team name must not be blank".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
