use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};

use super::KeyValueStore;

/// A serialized value waiting to be written under `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub key: &'static str,
    pub payload: String,
}

/// An in-memory value mirrored to one store key.
///
/// Every `set`/`update` serializes the new value immediately and hands back
/// the single write that mirrors it.
#[derive(Debug, Clone)]
pub struct Persisted<T> {
    key: &'static str,
    value: T,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Read `key` from the store, falling back to `default` when the key is
    /// absent or its payload does not deserialize.
    pub async fn load<S: KeyValueStore>(
        store: &S,
        key: &'static str,
        default: T,
    ) -> anyhow::Result<Self> {
        let stored = store
            .read(key)
            .await
            .with_context(|| format!("Failed to read {:?} from store", key))?;
        let value = match stored {
            None => default,
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key, error = %e, "stored value unreadable, using default");
                    default
                }
            },
        };
        Ok(Self { key, value })
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) -> serde_json::Result<PendingWrite> {
        let payload = serde_json::to_string(&value)?;
        self.value = value;
        Ok(PendingWrite {
            key: self.key,
            payload,
        })
    }

    /// Apply `f` to a copy and commit it only once it serializes.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) -> serde_json::Result<PendingWrite>
    where
        T: Clone,
    {
        let mut next = self.value.clone();
        f(&mut next);
        self.set(next)
    }
}

/// Write each pending value in order, one store write per entry.
pub async fn flush<S: KeyValueStore>(store: &S, writes: Vec<PendingWrite>) -> anyhow::Result<()> {
    for write in writes {
        store
            .write(write.key, &write.payload)
            .await
            .with_context(|| format!("Failed to write {:?} to store", write.key))?;
        tracing::trace!(key = write.key, bytes = write.payload.len(), "store write");
    }
    Ok(())
}
