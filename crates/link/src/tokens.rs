use std::{collections::HashMap, path::PathBuf};

use {
    agora_common::{Result, serialize_option_secret, serialize_secret},
    async_trait::async_trait,
    secrecy::Secret,
    serde::{Deserialize, Serialize},
    tracing::{debug, info},
};

/// Third-party token granted to a user at the end of a link handshake.
#[derive(Clone, Serialize, Deserialize)]
pub struct LinkedToken {
    #[serde(serialize_with = "serialize_secret")]
    pub access_token: Secret<String>,
    #[serde(
        default,
        serialize_with = "serialize_option_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub refresh_token: Option<Secret<String>>,
    /// Unix seconds when the access token expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
}

impl std::fmt::Debug for LinkedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedToken")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Per-user storage of granted third-party tokens for one app.
#[async_trait]
pub trait UserTokenStore: Send + Sync {
    async fn put(&self, user_id: &str, token: &LinkedToken) -> Result<()>;
    async fn get(&self, user_id: &str) -> Result<Option<LinkedToken>>;
    async fn delete(&self, user_id: &str) -> Result<()>;
}

/// File-based token storage: a JSON map keyed by user id, written `0600` on
/// Unix.
#[derive(Debug, Clone)]
pub struct FileUserTokenStore {
    path: PathBuf,
}

impl FileUserTokenStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Result<HashMap<String, LinkedToken>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "token file not found");
                return Ok(HashMap::new());
            },
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    fn write_all(&self, tokens: &HashMap<String, LinkedToken>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(tokens)?;
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
impl UserTokenStore for FileUserTokenStore {
    async fn put(&self, user_id: &str, token: &LinkedToken) -> Result<()> {
        let mut tokens = self.read_all()?;
        tokens.insert(user_id.to_string(), token.clone());
        self.write_all(&tokens)?;
        info!(path = %self.path.display(), user_id, "linked token saved");
        Ok(())
    }

    async fn get(&self, user_id: &str) -> Result<Option<LinkedToken>> {
        Ok(self.read_all()?.remove(user_id))
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        let mut tokens = self.read_all()?;
        if tokens.remove(user_id).is_some() {
            self.write_all(&tokens)?;
        }
        Ok(())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, secrecy::ExposeSecret, tempfile::TempDir};

    #[tokio::test]
    async fn round_trips_a_token() {
        let dir = TempDir::new().unwrap();
        let store = FileUserTokenStore::new(dir.path().join("tokens.json"));

        let token = LinkedToken {
            access_token: Secret::new("at".into()),
            refresh_token: Some(Secret::new("rt".into())),
            expires_at: Some(1_700_000_000),
        };
        store.put("u1", &token).await.unwrap();

        let loaded = store.get("u1").await.unwrap().unwrap();
        assert_eq!(loaded.access_token.expose_secret(), "at");
        assert_eq!(
            loaded.refresh_token.as_ref().unwrap().expose_secret(),
            "rt"
        );
        assert_eq!(loaded.expires_at, Some(1_700_000_000));

        store.delete("u1").await.unwrap();
        assert!(store.get("u1").await.unwrap().is_none());
    }

    #[test]
    fn debug_output_redacts_token_material() {
        let token = LinkedToken {
            access_token: Secret::new("at-secret".into()),
            refresh_token: None,
            expires_at: None,
        };
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("at-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
