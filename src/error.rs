//! 错误类型 - 仪表盘核心的错误分类
//!
//! 网络和存储错误在模块内部恢复（记录日志后回退到默认值），
//! 校验、最后一个 team、team 不存在这三类错误会返回给调用方。

use thiserror::Error;

/// 仪表盘核心错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    /// 外部接口请求失败或超时
    #[error("network unavailable for {endpoint}: {reason}")]
    NetworkUnavailable { endpoint: String, reason: String },

    /// 持久化数据无法解析
    #[error("stored state is corrupt: {0}")]
    StorageCorrupt(String),

    /// 输入校验失败（如空白 team 名称）
    #[error("validation failed: {0}")]
    Validation(String),

    /// 试图删除唯一剩余的 team
    #[error("cannot delete the last team")]
    LastTeam,

    /// 找不到指定 team
    #[error("team '{0}' not found")]
    TeamNotFound(String),
}

impl DashboardError {
    /// 是否为需要展示给用户的错误（网络/存储错误会在内部恢复）
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::LastTeam | Self::TeamNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_classification() {
        assert!(DashboardError::LastTeam.is_user_facing());
        assert!(DashboardError::Validation("blank".into()).is_user_facing());
        assert!(!DashboardError::StorageCorrupt("eof".into()).is_user_facing());
        assert!(!DashboardError::NetworkUnavailable {
            endpoint: "crypto".into(),
            reason: "timeout".into(),
        }
        .is_user_facing());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(DashboardError::LastTeam.to_string(), "cannot delete the last team");
        assert_eq!(
            DashboardError::TeamNotFound("42".into()).to_string(),
            "team '42' not found"
        );
    }
}
