//! 外部信号接口表

use serde::{Deserialize, Serialize};

pub const CRYPTO: &str = "crypto";
pub const RANDOM_USERS: &str = "randomUsers";
pub const JSON_PLACEHOLDER: &str = "jsonPlaceholder";

/// 命名的 GET 接口（无认证）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub url: String,
}

impl Endpoint {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// 默认接口表
pub fn default_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::new(CRYPTO, "https://api.coindesk.com/v1/bpi/currentprice.json"),
        Endpoint::new(RANDOM_USERS, "https://randomuser.me/api/?results=10"),
        Endpoint::new(JSON_PLACEHOLDER, "https://jsonplaceholder.typicode.com/users"),
        Endpoint::new("quotes", "https://api.quotable.io/random"),
        Endpoint::new("publicApis", "https://api.publicapis.org/random?auth=null"),
        Endpoint::new("httpbin", "https://httpbin.org/uuid"),
    ]
}
