use std::{collections::HashMap, path::PathBuf};

use {
    agora_common::{Error, Result},
    async_trait::async_trait,
    tracing::{debug, info},
};

use crate::{
    app::{App, AppId},
    store::AppStore,
};

/// File-based app registry: a JSON map keyed by app id at a caller-supplied
/// path. Suited to single-node deployments; the registry holds credentials,
/// so the file is written `0600` on Unix.
#[derive(Debug, Clone)]
pub struct FileAppStore {
    path: PathBuf,
}

impl FileAppStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<HashMap<String, App>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "app registry file not found");
                return Ok(HashMap::new());
            },
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    fn write_all(&self, apps: &HashMap<String, App>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(apps)?;
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
impl AppStore for FileAppStore {
    async fn load_app(&self, app_id: &AppId) -> Result<App> {
        self.read_all()?
            .remove(app_id.as_str())
            .ok_or_else(|| Error::not_found(format!("app {app_id}")))
    }

    async fn store_app(&self, app: App) -> Result<()> {
        let app_id = app.manifest.app_id.clone();
        let mut apps = self.read_all()?;
        apps.insert(app_id.to_string(), app);
        self.write_all(&apps)?;
        info!(path = %self.path.display(), app_id = %app_id, "app record stored");
        Ok(())
    }
}
