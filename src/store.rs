use crate::models::UserMessage;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

/// In-memory id→message mapping shared by every request.
///
/// Listing order is first-insertion order, kept as an explicit invariant in
/// `order` rather than left to map iteration. Overwriting an id replaces the
/// record but keeps its original slot. Nothing is evicted or persisted; a
/// restart loses all data.
#[derive(Default)]
pub struct MessageStore {
    inner: Mutex<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    records: HashMap<i64, UserMessage>,
    order: Vec<i64>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps `receive_At` and `tsDifference`, then inserts or silently
    /// overwrites under `msg.id`. Returns the stamped record.
    pub fn put(&self, mut msg: UserMessage) -> UserMessage {
        let received = epoch_ms();
        msg.receive_at = Some(received);
        msg.ts_difference = Some(received - msg.send_at);

        let mut inner = self.inner.lock().expect("message store lock poisoned");
        if inner.records.insert(msg.id, msg.clone()).is_none() {
            inner.order.push(msg.id);
        }
        msg
    }

    pub fn get(&self, id: i64) -> Option<UserMessage> {
        self.inner
            .lock()
            .expect("message store lock poisoned")
            .records
            .get(&id)
            .cloned()
    }

    /// Up to `limit` records starting at offset `skip`, in insertion order.
    /// A negative `skip` is clamped to 0; `limit <= 0` yields nothing; a
    /// `skip` past the end yields nothing.
    pub fn list(&self, skip: i64, limit: i64) -> Vec<UserMessage> {
        if limit <= 0 {
            return Vec::new();
        }
        let inner = self.inner.lock().expect("message store lock poisoned");
        inner
            .order
            .iter()
            .skip(skip.max(0) as usize)
            .take(limit as usize)
            .filter_map(|id| inner.records.get(id).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .expect("message store lock poisoned")
            .records
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
