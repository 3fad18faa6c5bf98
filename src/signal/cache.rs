//! 外部信号缓存 - fetcher 写入，生成器只读

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// 外部接口采样到的用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleUser {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// 缓存的外部信号（任意字段都可能缺失）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalSignal {
    /// 价格信号（BTC/USD）
    #[serde(default)]
    pub price: Option<f64>,
    /// 销售列表用的采样用户
    #[serde(default)]
    pub sample_users: Vec<SampleUser>,
    /// 活动流用的用户名目录
    #[serde(default)]
    pub directory_names: Vec<String>,
    /// 最近一次有数据写入的时间
    #[serde(default)]
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl ExternalSignal {
    /// 是否没有任何外部数据
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.sample_users.is_empty() && self.directory_names.is_empty()
    }

    /// 价格相对参考值的影响系数，无价格时为 1
    pub fn price_influence(&self, reference: f64) -> f64 {
        match self.price {
            Some(price) if price > 0.0 && reference > 0.0 => price / reference,
            _ => 1.0,
        }
    }
}

/// 共享的外部信号缓存
#[derive(Debug, Clone, Default)]
pub struct SignalCache {
    inner: Arc<RwLock<ExternalSignal>>,
}

impl SignalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取当前信号副本；锁中毒时返回空信号
    pub fn get(&self) -> ExternalSignal {
        self.inner
            .read()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// 修改缓存
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut ExternalSignal),
    {
        match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().map(|s| s.is_empty()).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_influence() {
        let mut signal = ExternalSignal::default();
        assert_eq!(signal.price_influence(45000.0), 1.0);

        signal.price = Some(90000.0);
        assert_eq!(signal.price_influence(45000.0), 2.0);

        signal.price = Some(0.0);
        assert_eq!(signal.price_influence(45000.0), 1.0);
    }

    #[test]
    fn test_cache_update_is_visible_to_clones() {
        let cache = SignalCache::new();
        let reader = cache.clone();
        assert!(reader.is_empty());

        cache.update(|s| s.directory_names.push("Leanne Graham".to_string()));
        assert!(!reader.is_empty());
        assert_eq!(reader.get().directory_names, vec!["Leanne Graham"]);
    }
}
