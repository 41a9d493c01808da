use std::{
    collections::HashMap,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use {
    agora_common::Result,
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
    tokio::sync::Mutex,
    tracing::debug,
};

/// One in-flight link attempt, keyed by user. Single use: taking it removes
/// it, so a replayed callback finds nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLink {
    pub user_id: String,
    /// One-time token the resume payload must present.
    pub nonce: String,
    /// Serialized [`crate::LinkPayload`].
    pub payload: Vec<u8>,
    /// Unix seconds; lets an operator sweep abandoned attempts.
    pub created_at: u64,
}

impl PendingLink {
    #[must_use]
    pub fn new(user_id: impl Into<String>, nonce: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            user_id: user_id.into(),
            nonce: nonce.into(),
            payload,
            created_at: unix_now(),
        }
    }
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Storage for in-flight link attempts: one per user, replaced on a new
/// start, removed on first take.
#[async_trait]
pub trait PendingLinkStore: Send + Sync {
    /// Replace any previous pending attempt for the user.
    async fn put(&self, link: PendingLink) -> Result<()>;

    /// Read the user's pending attempt without consuming it.
    async fn get(&self, user_id: &str) -> Result<Option<PendingLink>>;

    /// Remove and return the user's pending attempt, if any.
    async fn take(&self, user_id: &str) -> Result<Option<PendingLink>>;
}

/// Map-backed store for tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryPendingLinkStore {
    links: Mutex<HashMap<String, PendingLink>>,
}

impl InMemoryPendingLinkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PendingLinkStore for InMemoryPendingLinkStore {
    async fn put(&self, link: PendingLink) -> Result<()> {
        self.links
            .lock()
            .await
            .insert(link.user_id.clone(), link);
        Ok(())
    }

    async fn get(&self, user_id: &str) -> Result<Option<PendingLink>> {
        Ok(self.links.lock().await.get(user_id).cloned())
    }

    async fn take(&self, user_id: &str) -> Result<Option<PendingLink>> {
        Ok(self.links.lock().await.remove(user_id))
    }
}

/// File-based store: a JSON map keyed by user id, written `0600` on Unix.
#[derive(Debug, Clone)]
pub struct FilePendingLinkStore {
    path: PathBuf,
}

impl FilePendingLinkStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<HashMap<String, PendingLink>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "pending link file not found");
                return Ok(HashMap::new());
            },
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    fn write_all(&self, links: &HashMap<String, PendingLink>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(links)?;
        std::fs::write(&self.path, &data)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

#[async_trait]
impl PendingLinkStore for FilePendingLinkStore {
    async fn put(&self, link: PendingLink) -> Result<()> {
        let mut links = self.read_all()?;
        links.insert(link.user_id.clone(), link);
        self.write_all(&links)
    }

    async fn get(&self, user_id: &str) -> Result<Option<PendingLink>> {
        Ok(self.read_all()?.remove(user_id))
    }

    async fn take(&self, user_id: &str) -> Result<Option<PendingLink>> {
        let mut links = self.read_all()?;
        let taken = links.remove(user_id);
        if taken.is_some() {
            self.write_all(&links)?;
        }
        Ok(taken)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, tempfile::TempDir};

    #[tokio::test]
    async fn take_is_single_use() {
        let store = InMemoryPendingLinkStore::new();
        store
            .put(PendingLink::new("u1", "n1", b"payload".to_vec()))
            .await
            .unwrap();

        assert!(store.get("u1").await.unwrap().is_some());
        let taken = store.take("u1").await.unwrap().unwrap();
        assert_eq!(taken.nonce, "n1");
        assert!(store.take("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn a_new_start_replaces_the_previous_attempt() {
        let store = InMemoryPendingLinkStore::new();
        store
            .put(PendingLink::new("u1", "n1", Vec::new()))
            .await
            .unwrap();
        store
            .put(PendingLink::new("u1", "n2", Vec::new()))
            .await
            .unwrap();

        assert_eq!(store.take("u1").await.unwrap().unwrap().nonce, "n2");
    }

    #[tokio::test]
    async fn file_store_round_trips_and_consumes() {
        let dir = TempDir::new().unwrap();
        let store = FilePendingLinkStore::new(dir.path().join("pending.json"));

        store
            .put(PendingLink::new("u1", "n1", b"bytes".to_vec()))
            .await
            .unwrap();
        let taken = store.take("u1").await.unwrap().unwrap();
        assert_eq!(taken.payload, b"bytes");
        assert!(taken.created_at > 0);

        // Consumed on disk too.
        assert!(store.take("u1").await.unwrap().is_none());
    }
}
