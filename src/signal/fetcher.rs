//! 外部信号拉取 - 尽力而为的 HTTP 请求
//!
//! 每个接口独立请求，失败或超时只记录日志，不影响其他接口，
//! 也不会向调用方返回错误。缓存中已有的值在失败时保持不变。

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::cache::{SampleUser, SignalCache};
use super::endpoints::{Endpoint, CRYPTO, JSON_PLACEHOLDER, RANDOM_USERS};
use crate::error::DashboardError;

/// 默认请求超时（毫秒）
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5000;

const MAX_DIRECTORY_NAMES: usize = 10;

/// 外部信号拉取器
pub struct SignalFetcher {
    client: Client,
    endpoints: Vec<Endpoint>,
    cache: SignalCache,
}

impl SignalFetcher {
    /// 创建拉取器
    pub fn new(endpoints: Vec<Endpoint>, timeout: Duration, cache: SignalCache) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoints,
            cache,
        })
    }

    fn url_for(&self, name: &str) -> Option<&str> {
        self.endpoints
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.url.as_str())
    }

    async fn get_json(&self, name: &str) -> Result<Value, DashboardError> {
        let url = self.url_for(name).ok_or_else(|| DashboardError::NetworkUnavailable {
            endpoint: name.to_string(),
            reason: "endpoint not configured".to_string(),
        })?;

        let unavailable = |reason: String| DashboardError::NetworkUnavailable {
            endpoint: name.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(unavailable(format!("HTTP {}", response.status())));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| unavailable(e.to_string()))
    }

    /// 刷新缓存，返回本次成功更新的字段数
    pub async fn refresh(&self) -> usize {
        let mut updated = 0;

        match self.get_json(CRYPTO).await.map(|v| parse_price(&v)) {
            Ok(Some(price)) => {
                self.cache.update(|s| s.price = Some(price));
                updated += 1;
            }
            Ok(None) => warn!(endpoint = CRYPTO, "Price signal missing from response"),
            Err(e) => warn!(error = %e, "External signal fetch failed"),
        }

        match self.get_json(RANDOM_USERS).await.map(|v| parse_random_users(&v)) {
            Ok(users) if !users.is_empty() => {
                self.cache.update(|s| s.sample_users = users);
                updated += 1;
            }
            Ok(_) => warn!(endpoint = RANDOM_USERS, "No users in response"),
            Err(e) => warn!(error = %e, "External signal fetch failed"),
        }

        match self.get_json(JSON_PLACEHOLDER).await.map(|v| parse_directory_names(&v)) {
            Ok(names) if !names.is_empty() => {
                self.cache.update(|s| s.directory_names = names);
                updated += 1;
            }
            Ok(_) => warn!(endpoint = JSON_PLACEHOLDER, "No names in response"),
            Err(e) => warn!(error = %e, "External signal fetch failed"),
        }

        if updated > 0 {
            self.cache.update(|s| s.refreshed_at = Some(Utc::now()));
            info!(updated, "External signals refreshed");
        } else {
            debug!("External signals unavailable, using defaults");
        }

        updated
    }

    /// 逐个测试所有接口的连通性（不修改缓存）
    pub async fn test_connectivity(&self) -> BTreeMap<String, bool> {
        let mut results = BTreeMap::new();

        for endpoint in &self.endpoints {
            let ok = match self.client.get(&endpoint.url).send().await {
                Ok(resp) => resp.status().is_success(),
                Err(e) => {
                    debug!(endpoint = %endpoint.name, error = %e, "Connectivity check failed");
                    false
                }
            };
            results.insert(endpoint.name.clone(), ok);
        }

        results
    }

    /// 缓存中是否有任何外部数据
    pub fn is_connected(&self) -> bool {
        !self.cache.is_empty()
    }
}

/// 解析 coindesk 价格：`bpi.USD.rate`，形如 `"43,210.5678"`
pub fn parse_price(value: &Value) -> Option<f64> {
    let rate = value.get("bpi")?.get("USD")?;
    if let Some(n) = rate.get("rate_float").and_then(Value::as_f64) {
        return Some(n);
    }
    rate.get("rate")?
        .as_str()?
        .replace(',', "")
        .trim()
        .parse()
        .ok()
}

/// 解析 randomuser 的 `results[]`
pub fn parse_random_users(value: &Value) -> Vec<SampleUser> {
    let Some(results) = value.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|user| {
            let name = user.get("name")?;
            let first = name.get("first")?.as_str()?;
            let last = name.get("last")?.as_str()?;
            let email = user.get("email")?.as_str()?;
            let avatar = user
                .get("picture")
                .and_then(|p| p.get("thumbnail"))
                .and_then(Value::as_str)
                .map(|s| s.to_string());
            Some(SampleUser {
                name: format!("{} {}", first, last),
                email: email.to_string(),
                avatar,
            })
        })
        .collect()
}

/// 解析 jsonplaceholder 的用户名列表
pub fn parse_directory_names(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|users| {
            users
                .iter()
                .filter_map(|u| u.get("name").and_then(Value::as_str))
                .take(MAX_DIRECTORY_NAMES)
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}
