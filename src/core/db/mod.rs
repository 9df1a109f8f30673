mod persisted;
mod state;

use std::{
    collections::HashMap,
    future::Future,
    path::Path,
    sync::{Arc, Mutex},
};

use state::StoreState;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub use persisted::{PendingWrite, Persisted, flush};

/// Named, string-valued storage slots. Values are JSON documents.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> impl Future<Output = anyhow::Result<Option<String>>> + Send;
    fn write(&self, key: &str, value: &str) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// SQLite-backed store: one `kv_store` row per key.
#[derive(Debug, Clone)]
pub struct PlannerDb {
    state: Arc<StoreState>,
}

impl PlannerDb {
    pub async fn open<P: AsRef<Path>>(db_file: P) -> anyhow::Result<Self> {
        let state = StoreState::open(db_file).await?;
        tracing::info!(path = ?state.db_file(), "opened planner store");
        Ok(Self {
            state: Arc::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        self.state.db_file()
    }

    /// Keys currently present, in ascending order.
    pub async fn keys(&self) -> anyhow::Result<Vec<String>> {
        let mut conn = self.state.conn().await?;
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM kv_store ORDER BY key ASC")
            .fetch_all(&mut **conn)
            .await?;
        Ok(keys)
    }

    /// Checkpoint and release the database. Later reads or writes fail.
    pub async fn close(&self) -> anyhow::Result<()> {
        self.state.close().await
    }
}

impl KeyValueStore for PlannerDb {
    async fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut conn = self.state.conn().await?;
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&mut **conn)
            .await?;
        Ok(value)
    }

    async fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let updated_at = OffsetDateTime::now_utc().format(&Rfc3339)?;
        let mut conn = self.state.conn().await?;
        sqlx::query(
            r#"INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(updated_at)
        .execute(&mut **conn)
        .await?;
        Ok(())
    }
}

/// In-process store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    async fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
