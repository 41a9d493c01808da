use std::collections::HashMap;

use {
    agora_common::serialize_secret,
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

// ── Accounts ────────────────────────────────────────────────────────────────

/// A platform account. Timestamps are unix millis; `delete_at` of zero means
/// the account is active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub email: String,
    pub position: String,
    pub roles: String,
    pub locale: String,
    pub timezone: String,
    pub is_bot: bool,
    pub bot_description: String,
    pub auth_service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_data: Option<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub props: HashMap<String, String>,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
}

/// An automated account owned by an integration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bot {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub description: String,
    pub owner_id: String,
    pub create_at: i64,
    pub delete_at: i64,
}

impl Bot {
    /// View a bot account through its underlying user record.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            username: user.username.clone(),
            display_name: user.nickname.clone(),
            description: user.bot_description.clone(),
            owner_id: String::new(),
            create_at: user.create_at,
            delete_at: user.delete_at,
        }
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.delete_at != 0
    }
}

/// Arguments for creating a new bot account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSpec {
    pub username: String,
    pub display_name: String,
    pub description: String,
}

/// A personal access token minted for a bot account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub id: String,
    pub user_id: String,
    pub description: String,
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,
}

/// Credential of the session performing an administrative operation.
#[derive(Clone)]
pub struct SessionToken(Secret<String>);

impl SessionToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(Secret::new(token.into()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

// ── Places ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub id: String,
    pub create_at: i64,
    pub delete_at: i64,
    pub team_id: String,
    #[serde(rename = "type")]
    pub channel_type: String,
    pub display_name: String,
    pub name: String,
    pub header: String,
    pub purpose: String,
    pub creator_id: String,
    pub total_msg_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub id: String,
    pub create_at: i64,
    pub delete_at: i64,
    pub display_name: String,
    pub name: String,
    pub description: String,
    pub email: String,
    #[serde(rename = "type")]
    pub team_type: String,
    pub company_name: String,
    pub allowed_domains: String,
    pub invite_id: String,
}

// ── Content ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: String,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
    pub user_id: String,
    pub channel_id: String,
    /// Thread root; empty for top-level posts.
    pub root_id: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub message: String,
    pub hashtags: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub props: HashMap<String, serde_json::Value>,
}

// ── Memberships ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub team_id: String,
    pub user_id: String,
    pub roles: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelMember {
    pub channel_id: String,
    pub user_id: String,
    pub roles: String,
}

// ── Configuration ───────────────────────────────────────────────────────────

/// The whitelisted subset of the platform's sanitized configuration that
/// apps may see.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_url: String,
}
