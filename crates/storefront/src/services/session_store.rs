//! In-memory session store with expiry purging and a size bound.
//!
//! Records are keyed by session id. An expired record is hidden on load
//! and removed by the next sweep (see [`CartSessionStore::spawn_sweeper`]).
//! Once `max_sessions` records are held, saving a new session evicts the
//! record closest to expiry, so a client that never returns its cookie
//! cannot grow the map without bound.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, ExpiredDeletion, SessionStore};

/// Default upper bound on live sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 100_000;

/// Process-local session store shared by every request.
#[derive(Debug, Clone)]
pub struct CartSessionStore {
    records: Arc<Mutex<HashMap<Id, Record>>>,
    max_sessions: usize,
}

impl Default for CartSessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

impl CartSessionStore {
    /// Create an empty store holding at most `max_sessions` records (minimum 1).
    #[must_use]
    pub fn new(max_sessions: usize) -> Self {
        Self {
            records: Arc::default(),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Number of records currently held, expired ones included.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// Purge expired records every `period` until the task is aborted.
    pub fn spawn_sweeper(self, period: Duration) -> JoinHandle<()> {
        tracing::info!(period_secs = period.as_secs(), "Spawning session sweeper");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = self.delete_expired().await {
                    tracing::error!(error = %e, "Failed to purge expired sessions");
                }
            }
        })
    }

    fn insert(&self, records: &mut HashMap<Id, Record>, record: &Record) {
        if !records.contains_key(&record.id) && records.len() >= self.max_sessions {
            let oldest = records
                .values()
                .min_by_key(|r| r.expiry_date)
                .map(|r| r.id);
            if let Some(id) = oldest {
                records.remove(&id);
                tracing::debug!(
                    max_sessions = self.max_sessions,
                    "Session store full, evicted oldest"
                );
            }
        }
        records.insert(record.id, record.clone());
    }
}

fn is_active(record: &Record) -> bool {
    record.expiry_date > OffsetDateTime::now_utc()
}

#[async_trait]
impl SessionStore for CartSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.records.lock().await;
        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.insert(&mut records, record);
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let mut records = self.records.lock().await;
        self.insert(&mut records, record);
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .records
            .lock()
            .await
            .get(session_id)
            .filter(|r| is_active(r))
            .cloned())
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.lock().await.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for CartSessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, r| is_active(r));

        let purged = before - records.len();
        if purged > 0 {
            tracing::debug!(purged, remaining = records.len(), "Purged expired sessions");
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use tower_sessions::cookie::time::Duration as TimeDuration;
    use tower_sessions::{Expiry, Session};

    use super::*;
    use crate::services::SessionCart;

    fn record(expires_in: TimeDuration) -> Record {
        Record {
            id: Id::default(),
            data: HashMap::new(),
            expiry_date: OffsetDateTime::now_utc() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_expired_cart_is_hidden_then_purged() {
        let store = CartSessionStore::default();
        let expired = Expiry::AtDateTime(OffsetDateTime::now_utc() - TimeDuration::minutes(1));

        let session = Session::new(None, Arc::new(store.clone()), Some(expired));
        SessionCart::new(session.clone())
            .add_item("iphone".into())
            .await
            .unwrap();
        session.save().await.unwrap();
        let id = session.id().unwrap();
        assert_eq!(store.len().await, 1);

        let revisit = SessionCart::new(Session::new(Some(id), Arc::new(store.clone()), None));
        assert!(revisit.get_cart().await.unwrap().is_empty());

        store.delete_expired().await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_sweep_keeps_live_sessions() {
        let store = CartSessionStore::default();
        let live = record(TimeDuration::hours(1));
        store.save(&live).await.unwrap();
        store.save(&record(-TimeDuration::seconds(1))).await.unwrap();

        store.delete_expired().await.unwrap();
        assert_eq!(store.len().await, 1);
        assert!(store.load(&live.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_full_store_evicts_soonest_expiry() {
        let store = CartSessionStore::new(2);
        let soon = record(TimeDuration::minutes(1));
        let later = record(TimeDuration::hours(1));
        let newest = record(TimeDuration::days(1));

        store.save(&soon).await.unwrap();
        store.save(&later).await.unwrap();
        store.save(&newest).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert!(store.load(&soon.id).await.unwrap().is_none());
        assert!(store.load(&later.id).await.unwrap().is_some());
        assert!(store.load(&newest.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_resaving_existing_session_does_not_evict() {
        let store = CartSessionStore::new(1);
        let mut only = record(TimeDuration::hours(1));
        store.save(&only).await.unwrap();

        only.expiry_date += TimeDuration::hours(1);
        store.save(&only).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert!(store.load(&only.id).await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_purges_in_background() {
        let store = CartSessionStore::default();
        store.save(&record(-TimeDuration::seconds(1))).await.unwrap();

        let handle = store.clone().spawn_sweeper(Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(store.is_empty().await);
        handle.abort();
    }
}
