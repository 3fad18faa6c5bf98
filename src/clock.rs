//! 时钟抽象 - 生成器读取的本地挂钟时间
//!
//! 生产环境使用系统时钟，测试中注入固定时间以获得可预期的时段系数。

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};

/// 本地挂钟时间来源
pub trait Clock: Send + Sync {
    /// 当前本地时间
    fn now(&self) -> NaiveDateTime;

    /// 当前小时（0-23）
    fn hour(&self) -> u32 {
        self.now().hour()
    }

    /// 今天的日期
    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// 当前时间（UTC），本地时间不存在时（夏令时跳变）按 UTC 解释
    fn now_utc(&self) -> DateTime<Utc> {
        let now = self.now();
        Local
            .from_local_datetime(&now)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&now))
    }
}

/// 系统时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定时钟（测试用）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// 从日期和小时构造
    pub fn at(date: NaiveDate, hour: u32) -> Self {
        Self(
            date.and_hms_opt(hour, 0, 0)
                .unwrap_or_else(|| date.and_time(NaiveTime::MIN)),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_reports_hour_and_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let clock = FixedClock::at(date, 14);
        assert_eq!(clock.hour(), 14);
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn test_fixed_clock_utc_matches_local_time() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let clock = FixedClock::at(date, 12);
        assert_eq!(clock.now_utc().with_timezone(&Local).naive_local(), clock.now());
    }

    #[test]
    fn test_invalid_hour_falls_back_to_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let clock = FixedClock::at(date, 30);
        assert_eq!(clock.hour(), 0);
    }
}
