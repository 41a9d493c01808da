use std::collections::HashMap;

use {
    agora_common::{Error, Result},
    async_trait::async_trait,
    tokio::sync::RwLock,
};

use crate::app::{App, AppId};

/// Persistent registry of provisioned apps, keyed by app id.
///
/// The store is the system of record for app credentials and bot identity.
/// Writes replace the whole record; there are no merge semantics.
#[async_trait]
pub trait AppStore: Send + Sync {
    /// `NotFound` when no record exists for `app_id`.
    async fn load_app(&self, app_id: &AppId) -> Result<App>;

    /// Create-or-overwrite the record for `app.manifest.app_id`.
    async fn store_app(&self, app: App) -> Result<()>;
}

/// Map-backed store for tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryAppStore {
    apps: RwLock<HashMap<AppId, App>>,
}

impl InMemoryAppStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppStore for InMemoryAppStore {
    async fn load_app(&self, app_id: &AppId) -> Result<App> {
        self.apps
            .read()
            .await
            .get(app_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("app {app_id}")))
    }

    async fn store_app(&self, app: App) -> Result<()> {
        self.apps
            .write()
            .await
            .insert(app.manifest.app_id.clone(), app);
        Ok(())
    }
}
