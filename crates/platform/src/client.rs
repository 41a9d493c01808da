use {agora_common::Result, async_trait::async_trait, tracing::warn};

use crate::types::{
    AccessToken, Bot, BotSpec, Channel, Post, SessionToken, SiteConfig, Team, User,
};

/// Identity gateway onto the host platform.
///
/// Every read resolves a single entity by id; administrative calls carry the
/// acting session's credential. Implementations own their timeouts and must
/// surface a timed-out or failed call as `Upstream`, and a missing entity as
/// `NotFound`. Nothing here retries.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    async fn get_user(&self, user_id: &str) -> Result<User>;
    async fn get_user_by_username(&self, username: &str) -> Result<User>;
    async fn get_channel(&self, channel_id: &str) -> Result<Channel>;
    async fn get_post(&self, post_id: &str) -> Result<Post>;
    async fn get_team(&self, team_id: &str) -> Result<Team>;

    async fn create_bot(&self, spec: BotSpec, session: &SessionToken) -> Result<Bot>;
    async fn enable_bot(&self, bot_user_id: &str, session: &SessionToken) -> Result<Bot>;
    async fn create_access_token(
        &self,
        user_id: &str,
        description: &str,
        session: &SessionToken,
    ) -> Result<AccessToken>;

    /// Post a direct message from one account to another.
    async fn send_direct_message(
        &self,
        from_user_id: &str,
        to_user_id: &str,
        message: &str,
    ) -> Result<()>;
}

/// Access to the platform's current sanitized configuration snapshot.
///
/// This is an in-process read, never a store or network fetch; callers may
/// invoke it on every expansion without paying for a round trip.
pub trait ConfigSource: Send + Sync {
    fn sanitized(&self) -> SiteConfig;
}

// ── Inert defaults ──────────────────────────────────────────────────────────

/// Placeholder client for wiring the subsystem before a real gateway exists.
pub struct NoopPlatformClient;

fn platform_not_configured(operation: &'static str) -> agora_common::Error {
    warn!(operation, "platform client not configured");
    agora_common::Error::upstream("platform client not configured")
}

#[async_trait]
impl PlatformClient for NoopPlatformClient {
    async fn get_user(&self, _user_id: &str) -> Result<User> {
        Err(platform_not_configured("get_user"))
    }

    async fn get_user_by_username(&self, _username: &str) -> Result<User> {
        Err(platform_not_configured("get_user_by_username"))
    }

    async fn get_channel(&self, _channel_id: &str) -> Result<Channel> {
        Err(platform_not_configured("get_channel"))
    }

    async fn get_post(&self, _post_id: &str) -> Result<Post> {
        Err(platform_not_configured("get_post"))
    }

    async fn get_team(&self, _team_id: &str) -> Result<Team> {
        Err(platform_not_configured("get_team"))
    }

    async fn create_bot(&self, _spec: BotSpec, _session: &SessionToken) -> Result<Bot> {
        Err(platform_not_configured("create_bot"))
    }

    async fn enable_bot(&self, _bot_user_id: &str, _session: &SessionToken) -> Result<Bot> {
        Err(platform_not_configured("enable_bot"))
    }

    async fn create_access_token(
        &self,
        _user_id: &str,
        _description: &str,
        _session: &SessionToken,
    ) -> Result<AccessToken> {
        Err(platform_not_configured("create_access_token"))
    }

    async fn send_direct_message(
        &self,
        _from_user_id: &str,
        _to_user_id: &str,
        _message: &str,
    ) -> Result<()> {
        Err(platform_not_configured("send_direct_message"))
    }
}

/// Fixed snapshot, for wiring and tests.
pub struct StaticConfigSource {
    config: SiteConfig,
}

impl StaticConfigSource {
    #[must_use]
    pub fn new(site_url: impl Into<String>) -> Self {
        Self {
            config: SiteConfig {
                site_url: site_url.into(),
            },
        }
    }
}

impl ConfigSource for StaticConfigSource {
    fn sanitized(&self) -> SiteConfig {
        self.config.clone()
    }
}
