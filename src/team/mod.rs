//! Team 模块 - team 列表、选中状态与持久化
//!
//! ## 子模块
//!
//! - `model` - Team 数据结构、计划、slug 和默认 team
//! - `store` - 数据目录下的 JSON 持久化
//! - `context` - 创建/切换/更新/删除状态机
//!
//! ## 数据存储
//!
//! 默认存储在 `~/.config/adb-insights/` 目录：
//! - `dashboard-teams.json` - team 列表
//! - `dashboard-selected-team.json` - 选中 team 的 id

pub mod model;
pub mod store;
pub mod context;

pub use model::{default_teams, slugify, Plan, Team, TeamUpdate};
pub use store::{default_data_dir, StoredTeams, TeamStore};
pub use context::TeamContext;
