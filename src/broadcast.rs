//! 快照广播器 - 管理订阅者并分发快照
//!
//! `publish` 先在锁内复制当前回调列表，再在锁外逐个调用，
//! 因此回调里取消订阅（自己或其他订阅者）不会死锁，
//! 也不会影响本轮已复制的其他订阅者收到快照。
//! 单个回调 panic 只记录日志，不影响其他订阅者和后续广播。

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, trace, warn};

use crate::data::Snapshot;

/// 订阅回调
pub type SnapshotCallback = Arc<dyn Fn(Arc<Snapshot>) + Send + Sync>;

/// 订阅 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Registry = Mutex<HashMap<SubscriptionId, SnapshotCallback>>;

/// 快照广播器
pub struct Broadcaster {
    subscribers: Arc<Registry>,
    next_id: AtomicU64,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// 注册回调，返回用于取消订阅的句柄
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Arc<Snapshot>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut subscribers = lock(&self.subscribers);
        subscribers.insert(id, Arc::new(callback));
        debug!(subscription = id.0, total = subscribers.len(), "Subscriber added");

        Subscription {
            id,
            registry: Arc::downgrade(&self.subscribers),
        }
    }

    /// 把同一份快照分发给当前所有订阅者，返回成功送达次数
    pub fn publish(&self, snapshot: Arc<Snapshot>) -> usize {
        let callbacks: Vec<(SubscriptionId, SnapshotCallback)> = lock(&self.subscribers)
            .iter()
            .map(|(id, cb)| (*id, Arc::clone(cb)))
            .collect();

        let mut delivered = 0;
        for (id, callback) in &callbacks {
            trace!(subscription = id.0, "Delivering snapshot");
            let snap = Arc::clone(&snapshot);
            match panic::catch_unwind(AssertUnwindSafe(|| callback(snap))) {
                Ok(()) => delivered += 1,
                Err(_) => warn!(subscription = id.0, "Subscriber callback panicked"),
            }
        }

        delivered
    }

    /// 当前订阅者数量
    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).len()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

fn lock(registry: &Registry) -> std::sync::MutexGuard<'_, HashMap<SubscriptionId, SnapshotCallback>> {
    match registry.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// 订阅句柄
///
/// drop 时自动取消订阅；需要长期订阅时请保留句柄。
#[must_use = "dropping a Subscription unsubscribes immediately"]
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<Registry>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// 取消订阅（可重复调用，可在回调中调用）
    pub fn unsubscribe(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        // 回调在锁外释放，回调内部可能持有其他句柄
        let removed = lock(&registry).remove(&self.id);
        let found = removed.is_some();
        if found {
            debug!(subscription = self.id.0, "Subscriber removed");
        }
        drop(removed);
        found
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
