//! Team 倍率配置与时段系数

/// Team 倍率
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamMultiplier {
    pub revenue: f64,
    pub customers: f64,
    pub accounts: f64,
}

impl TeamMultiplier {
    /// 默认（个人 team）倍率
    pub const IDENTITY: Self = Self {
        revenue: 1.0,
        customers: 1.0,
        accounts: 1.0,
    };

    /// 按 team id 查找倍率，未知或缺失时回退到默认倍率
    pub fn for_team(team_id: Option<&str>) -> Self {
        match team_id {
            Some("2") => Self {
                revenue: 2.5,
                customers: 3.2,
                accounts: 2.8,
            },
            Some("3") => Self {
                revenue: 1.8,
                customers: 2.1,
                accounts: 1.9,
            },
            _ => Self::IDENTITY,
        }
    }
}

/// 时段系数：工作时间 1.5，扩展时间 1.0，夜间 0.3
pub fn time_of_day_variation(hour: u32) -> f64 {
    match hour {
        9..=17 => 1.5,
        6..=22 => 1.0,
        _ => 0.3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variation_boundaries() {
        assert_eq!(time_of_day_variation(5), 0.3);
        assert_eq!(time_of_day_variation(6), 1.0);
        assert_eq!(time_of_day_variation(8), 1.0);
        assert_eq!(time_of_day_variation(9), 1.5);
        assert_eq!(time_of_day_variation(17), 1.5);
        assert_eq!(time_of_day_variation(18), 1.0);
        assert_eq!(time_of_day_variation(22), 1.0);
        assert_eq!(time_of_day_variation(23), 0.3);
        assert_eq!(time_of_day_variation(0), 0.3);
    }

    #[test]
    fn test_unknown_team_uses_identity() {
        assert_eq!(TeamMultiplier::for_team(None), TeamMultiplier::IDENTITY);
        assert_eq!(TeamMultiplier::for_team(Some("1")), TeamMultiplier::IDENTITY);
        assert_eq!(TeamMultiplier::for_team(Some("999")), TeamMultiplier::IDENTITY);
        assert_eq!(TeamMultiplier::for_team(Some("2")).revenue, 2.5);
    }
}
