//! Signal 模块 - 外部信号的拉取与缓存
//!
//! 外部数据只用于增加真实感，任何接口不可用时生成器都会回退到默认值。

pub mod cache;
pub mod endpoints;
pub mod fetcher;

pub use cache::{ExternalSignal, SampleUser, SignalCache};
pub use endpoints::{default_endpoints, Endpoint};
pub use fetcher::{SignalFetcher, DEFAULT_FETCH_TIMEOUT_MS};
