use {
    agora_common::{serialize_option_secret, serialize_secret},
    secrecy::Secret,
    serde::{Deserialize, Serialize},
};

/// Unique identifier of a registered app. Doubles as the app's bot username.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub String);

impl AppId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// An app's declared identity and capability metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub app_id: AppId,
    pub display_name: String,
    pub description: String,
    pub homepage_url: String,
    /// Base URL the app's calls are dispatched to.
    pub root_url: String,
    pub oauth2_client_id: String,
    #[serde(
        serialize_with = "serialize_option_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub oauth2_client_secret: Option<Secret<String>>,
}

/// One provisioned third-party integration.
///
/// Created whole by provisioning, overwritten whole on re-provisioning with
/// force, read by expansion and call dispatch. Never partially mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
    pub manifest: Manifest,
    pub bot_user_id: String,
    pub bot_username: String,
    #[serde(serialize_with = "serialize_secret")]
    pub bot_access_token: Secret<String>,
    /// App-level shared secret submitted at provisioning time.
    #[serde(
        default,
        serialize_with = "serialize_option_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub secret: Option<Secret<String>>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            manifest: Manifest::default(),
            bot_user_id: String::new(),
            bot_username: String::new(),
            bot_access_token: Secret::new(String::new()),
            secret: None,
        }
    }
}
