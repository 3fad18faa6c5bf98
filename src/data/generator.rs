//! 数据生成器 - 按 team 倍率、时段和外部信号生成仪表盘快照
//!
//! 每次调用都生成全新的 [`Snapshot`]。随机源可注入种子，
//! 因此测试可以复现同一组输出；生产环境使用系统熵。

use chrono::{Datelike, Duration, Weekday};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use tracing::debug;

use super::profile::{time_of_day_variation, TeamMultiplier};
use super::templates::{self, PLACEHOLDER_AVATAR};
use super::types::*;
use crate::clock::{Clock, SystemClock};
use crate::format::{elapsed_label, format_sale_amount};
use crate::signal::{ExternalSignal, SignalCache};

/// 价格信号的默认参考值
pub const DEFAULT_PRICE_REFERENCE: f64 = 45000.0;

const RECENT_SALES: usize = 5;
const ACTIVITY_EVENTS: usize = 8;
const NOTIFICATION_COUNT: usize = 4;
const TRAFFIC_DAYS: i64 = 30;
const BASE_VISITORS: f64 = 1200.0;

/// 未叠加随机量的基础指标
pub const BASE_METRICS: DashboardMetrics = DashboardMetrics {
    total_revenue: 45231.89,
    new_customers: 2350,
    active_accounts: 12234,
    growth_rate: 20.1,
    active_users: 573,
};

/// 仪表盘数据生成器
pub struct DataGenerator {
    rng: Mutex<StdRng>,
    clock: Arc<dyn Clock>,
    signals: SignalCache,
    price_reference: f64,
}

impl DataGenerator {
    /// 创建生成器（系统时钟，系统熵）
    pub fn new(signals: SignalCache) -> Self {
        Self::with_parts(signals, Arc::new(SystemClock), None)
    }

    /// 创建生成器，可指定时钟和随机种子
    pub fn with_parts(signals: SignalCache, clock: Arc<dyn Clock>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            clock,
            signals,
            price_reference: DEFAULT_PRICE_REFERENCE,
        }
    }

    /// 设置价格信号参考值
    pub fn with_price_reference(mut self, reference: f64) -> Self {
        self.price_reference = reference;
        self
    }

    /// 生成一份快照
    pub fn generate(&self, team_id: Option<&str>) -> Snapshot {
        let signal = self.signals.get();
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.generate_with(&mut *rng, team_id, &signal)
    }

    fn generate_with<R: Rng>(
        &self,
        rng: &mut R,
        team_id: Option<&str>,
        signal: &ExternalSignal,
    ) -> Snapshot {
        let now = self.clock.now();
        let multiplier = TeamMultiplier::for_team(team_id);
        let variation = time_of_day_variation(self.clock.hour());
        let influence = signal.price_influence(self.price_reference);

        debug!(
            team_id = team_id.unwrap_or("default"),
            variation,
            influence,
            "Generating dashboard snapshot"
        );

        Snapshot {
            team_id: team_id.map(|s| s.to_string()),
            generated_at: self.clock.now_utc(),
            metrics: metrics(rng, multiplier, variation, influence),
            revenue_data: revenue_series(rng, multiplier.revenue, now.month0()),
            recent_sales: recent_sales(rng, signal),
            top_channels: top_channels(rng),
            activity_feed: activity_feed(rng, signal),
            traffic_data: traffic_series(rng, now.date()),
            traffic_sources: templates::traffic_sources(),
            conversion_funnel: templates::conversion_funnel(),
            age_distribution: templates::age_distribution(),
            device_types: templates::device_types(),
            notifications: notifications(rng),
        }
    }
}

fn metrics<R: Rng>(
    rng: &mut R,
    m: TeamMultiplier,
    variation: f64,
    influence: f64,
) -> DashboardMetrics {
    let base = &BASE_METRICS;
    DashboardMetrics {
        total_revenue: base.total_revenue * m.revenue * influence
            + rng.gen::<f64>() * 1000.0 * variation,
        new_customers: (base.new_customers as f64 * m.customers
            + rng.gen::<f64>() * 50.0 * variation)
            .floor() as u64,
        active_accounts: (base.active_accounts as f64 * m.accounts
            + rng.gen::<f64>() * 100.0 * variation)
            .floor() as u64,
        growth_rate: (base.growth_rate + (rng.gen::<f64>() - 0.5) * 2.0).max(0.0),
        active_users: (base.active_users as f64 * m.customers
            + rng.gen::<f64>() * 20.0 * variation)
            .floor() as u64,
    }
}

/// 十二个月收入：线性增长基数，当月及之前的月份叠加随机量
fn revenue_series<R: Rng>(rng: &mut R, revenue_multiplier: f64, current_month0: u32) -> Vec<RevenuePoint> {
    templates::MONTHS
        .iter()
        .enumerate()
        .map(|(index, month)| {
            let mut total = (3000.0 + index as f64 * 200.0) * revenue_multiplier;
            if index as u32 <= current_month0 {
                total += rng.gen::<f64>() * 1000.0;
            }
            RevenuePoint {
                name: month.to_string(),
                total: total.floor() as u64,
            }
        })
        .collect()
}

fn sale_amount<R: Rng>(rng: &mut R) -> String {
    format_sale_amount(rng.gen::<f64>() * 2000.0 + 50.0)
}

fn recent_sales<R: Rng>(rng: &mut R, signal: &ExternalSignal) -> Vec<Sale> {
    if !signal.sample_users.is_empty() {
        return signal
            .sample_users
            .iter()
            .take(RECENT_SALES)
            .map(|user| Sale {
                name: user.name.clone(),
                email: user.email.clone(),
                amount: sale_amount(rng),
                avatar: user
                    .avatar
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string()),
            })
            .collect();
    }

    (0..RECENT_SALES)
        .map(|_| {
            let name = templates::SALE_NAMES
                .choose(rng)
                .copied()
                .unwrap_or(templates::SALE_NAMES[0]);
            Sale {
                name: name.to_string(),
                email: format!("{}@company.com", name.to_lowercase().replacen(' ', ".", 1)),
                amount: sale_amount(rng),
                avatar: PLACEHOLDER_AVATAR.to_string(),
            }
        })
        .collect()
}

fn top_channels<R: Rng>(rng: &mut R) -> Vec<ChannelStat> {
    templates::CHANNELS
        .iter()
        .map(|(name, visitors, percentage, change)| ChannelStat {
            name: name.to_string(),
            visitors: (*visitors as f64 * rng.gen_range(0.8..1.2)).floor() as u64,
            percentage: (percentage * rng.gen_range(0.8..1.2) * 10.0).round() / 10.0,
            change: change.to_string(),
        })
        .collect()
}

fn activity_feed<R: Rng>(rng: &mut R, signal: &ExternalSignal) -> Vec<ActivityEvent> {
    let users: Vec<&str> = if signal.directory_names.is_empty() {
        templates::ACTIVITY_USERS.to_vec()
    } else {
        signal.directory_names.iter().take(10).map(String::as_str).collect()
    };

    (0..ACTIVITY_EVENTS)
        .map(|_| {
            let user = users.choose(rng).copied().unwrap_or("Unknown");
            let action = templates::ACTIVITY_ACTIONS
                .choose(rng)
                .copied()
                .unwrap_or(templates::ACTIVITY_ACTIONS[0]);
            ActivityEvent {
                user: user.to_string(),
                action: action.to_string(),
                time: elapsed_label(rng.gen_range(1..=120)),
                avatar: PLACEHOLDER_AVATAR.to_string(),
            }
        })
        .collect()
}

/// 截止今天的 30 天流量，工作日 1.3 倍，周末 0.7 倍，±20% 抖动
fn traffic_series<R: Rng>(rng: &mut R, today: chrono::NaiveDate) -> Vec<TrafficPoint> {
    (0..TRAFFIC_DAYS)
        .map(|i| {
            let date = today - Duration::days(TRAFFIC_DAYS - 1 - i);
            let weekday_multiplier = match date.weekday() {
                Weekday::Sat | Weekday::Sun => 0.7,
                _ => 1.3,
            };
            let visitors = BASE_VISITORS * weekday_multiplier * rng.gen_range(0.8..1.2);
            TrafficPoint {
                date,
                visitors: visitors.floor() as u64,
            }
        })
        .collect()
}

fn notifications<R: Rng>(rng: &mut R) -> Vec<Notification> {
    let sampled: Vec<_> = templates::NOTIFICATIONS
        .choose_multiple(rng, NOTIFICATION_COUNT)
        .collect();
    let mut picked: Vec<(u32, Notification)> = sampled
        .into_iter()
        .map(|(title, description, kind)| {
            let minutes = rng.gen_range(1..=48 * 60);
            (
                minutes,
                Notification {
                    title: title.to_string(),
                    description: description.to_string(),
                    time: elapsed_label(minutes),
                    kind: *kind,
                },
            )
        })
        .collect();
    picked.sort_by_key(|(minutes, _)| *minutes);
    picked.into_iter().map(|(_, n)| n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::signal::SampleUser;
    use chrono::NaiveDate;

    fn generator_at(hour: u32, month: u32) -> (DataGenerator, SignalCache) {
        let cache = SignalCache::new();
        let date = NaiveDate::from_ymd_opt(2024, month, 12).unwrap();
        let gen = DataGenerator::with_parts(cache.clone(), Arc::new(FixedClock::at(date, hour)), Some(7));
        (gen, cache)
    }

    #[test]
    fn test_future_months_have_no_noise() {
        let (gen, _) = generator_at(10, 3);
        let snapshot = gen.generate(Some("1"));
        for (index, point) in snapshot.revenue_data.iter().enumerate().skip(3) {
            assert_eq!(point.total, 3000 + index as u64 * 200);
        }
        for (index, point) in snapshot.revenue_data.iter().enumerate().take(3) {
            let base = 3000 + index as u64 * 200;
            assert!(point.total >= base && point.total < base + 1000);
        }
    }

    #[test]
    fn test_generated_at_follows_injected_clock() {
        let (gen, _) = generator_at(10, 6);
        let snapshot = gen.generate(None);
        assert_eq!(snapshot.generated_at, gen.clock.now_utc());
    }

    #[test]
    fn test_same_seed_reproduces_metrics() {
        let (a, _) = generator_at(10, 6);
        let (b, _) = generator_at(10, 6);
        assert_eq!(a.generate(Some("2")).metrics, b.generate(Some("2")).metrics);
    }

    #[test]
    fn test_night_variation_bounds_deltas() {
        let (gen, _) = generator_at(3, 6);
        for _ in 0..50 {
            let m = gen.generate(None).metrics;
            assert!(m.total_revenue >= BASE_METRICS.total_revenue);
            assert!(m.total_revenue < BASE_METRICS.total_revenue + 300.0);
            assert!(m.new_customers <= BASE_METRICS.new_customers + 15);
        }
    }

    #[test]
    fn test_price_signal_scales_revenue() {
        let (gen, cache) = generator_at(3, 6);
        cache.update(|s| s.price = Some(90000.0));
        let m = gen.generate(None).metrics;
        assert!(m.total_revenue >= BASE_METRICS.total_revenue * 2.0);
        assert!(m.total_revenue < BASE_METRICS.total_revenue * 2.0 + 300.0);
    }

    #[test]
    fn test_sales_prefer_sampled_users() {
        let (gen, cache) = generator_at(10, 6);
        cache.update(|s| {
            s.sample_users = (0..8)
                .map(|i| SampleUser {
                    name: format!("User {}", i),
                    email: format!("user{}@example.com", i),
                    avatar: None,
                })
                .collect();
        });
        let sales = gen.generate(None).recent_sales;
        assert_eq!(sales.len(), RECENT_SALES);
        assert_eq!(sales[0].name, "User 0");
        assert_eq!(sales[4].email, "user4@example.com");
        assert_eq!(sales[0].avatar, PLACEHOLDER_AVATAR);
    }

    #[test]
    fn test_fallback_sale_emails() {
        let (gen, _) = generator_at(10, 6);
        for sale in gen.generate(None).recent_sales {
            assert!(templates::SALE_NAMES.contains(&sale.name.as_str()));
            assert!(sale.email.ends_with("@company.com"));
            assert!(!sale.email.contains(' '));
            assert!(sale.amount.starts_with("+$"));
        }
    }

    #[test]
    fn test_activity_uses_directory_names() {
        let (gen, cache) = generator_at(10, 6);
        cache.update(|s| s.directory_names = vec!["Leanne Graham".to_string()]);
        for event in gen.generate(None).activity_feed {
            assert_eq!(event.user, "Leanne Graham");
        }
    }

    #[test]
    fn test_notifications_are_distinct_and_sorted() {
        let (gen, _) = generator_at(10, 6);
        let notes = gen.generate(None).notifications;
        assert_eq!(notes.len(), NOTIFICATION_COUNT);
        let mut titles: Vec<_> = notes.iter().map(|n| n.title.clone()).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), NOTIFICATION_COUNT);
    }
}
