use std::sync::Arc;

use {
    agora_apps::{App, AppStore, Context, Manifest},
    agora_common::{Error, Result, serialize_option_secret},
    agora_platform::{AccessToken, Bot, BotSpec, PlatformClient, SessionToken},
    secrecy::Secret,
    serde::{Deserialize, Serialize},
    tracing::{debug, info, warn},
};

use crate::locks::AppLocks;

/// Input to [`ProvisionService::provision_app`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionRequest {
    pub manifest: Manifest,
    #[serde(
        serialize_with = "serialize_option_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub app_secret: Option<Secret<String>>,
    /// Overwrite an existing record instead of failing `AlreadyExists`.
    pub force: bool,
}

/// Idempotently provisions apps: resolves (or creates) the app's bot
/// identity, mints a fresh access token, and persists the whole record.
pub struct ProvisionService {
    platform: Arc<dyn PlatformClient>,
    store: Arc<dyn AppStore>,
    locks: AppLocks,
}

impl ProvisionService {
    #[must_use]
    pub fn new(platform: Arc<dyn PlatformClient>, store: Arc<dyn AppStore>) -> Self {
        Self {
            platform,
            store,
            locks: AppLocks::default(),
        }
    }

    /// Provision the app described by `request.manifest` on behalf of the
    /// acting user in `context`, authorized by `session`.
    ///
    /// Returns the stored record plus a markdown confirmation. Holds the
    /// per-app lock for the whole load/ensure/store sequence, so concurrent
    /// calls for the same app id cannot duplicate bot creation.
    pub async fn provision_app(
        &self,
        context: &Context,
        session: &SessionToken,
        request: ProvisionRequest,
    ) -> Result<(App, String)> {
        let app_id = request.manifest.app_id.clone();
        if app_id.is_empty() {
            return Err(Error::validation("app id must not be empty"));
        }

        let lock = self.locks.acquire(&app_id);
        let _guard = lock.lock().await;

        match self.store.load_app(&app_id).await {
            Ok(_) if !request.force => {
                return Err(Error::already_exists(format!(
                    "app {app_id} already provisioned, use force to overwrite"
                )));
            },
            Ok(_) => debug!(app_id = %app_id, "overwriting existing app record"),
            Err(e) if e.is_not_found() => {},
            Err(e) => return Err(e),
        }

        let (bot, token) = self
            .ensure_bot(&request.manifest, &context.acting_user_id, session)
            .await?;

        let app = App {
            manifest: request.manifest,
            bot_user_id: bot.user_id,
            bot_username: bot.username,
            bot_access_token: token.token,
            secret: request.app_secret,
        };
        self.store.store_app(app.clone()).await?;

        info!(app_id = %app.manifest.app_id, bot = %app.bot_username, "app provisioned");
        let summary = format!(
            "Provisioned app `{}` [{}]({}). Bot account `@{}`.",
            app.manifest.app_id,
            app.manifest.display_name,
            app.manifest.homepage_url,
            app.bot_username
        );
        Ok((app, summary))
    }

    /// Resolve the app's bot identity, creating or re-enabling the account
    /// as needed, and mint a fresh access token for it.
    ///
    /// The bot username is derived 1:1 from the app id. Possible outcomes:
    /// no account → created; disabled bot → enabled; active bot → reused;
    /// username held by a non-bot account → `Conflict`.
    async fn ensure_bot(
        &self,
        manifest: &Manifest,
        acting_user_id: &str,
        session: &SessionToken,
    ) -> Result<(Bot, AccessToken)> {
        let spec = BotSpec {
            username: manifest.app_id.to_string(),
            display_name: manifest.display_name.clone(),
            description: format!("Bot account for the `{}` app.", manifest.display_name),
        };

        let bot = match self.platform.get_user_by_username(&spec.username).await {
            Err(e) if e.is_not_found() => {
                let bot = self
                    .platform
                    .create_bot(spec, session)
                    .await
                    .map_err(|e| e.context("could not create bot"))?;
                debug!(bot = %bot.username, "bot account created");
                bot
            },
            Err(e) => return Err(e.context("could not look up bot username")),
            Ok(user) if !user.is_bot => {
                return Err(Error::conflict(format!(
                    "a user already owns the bot username {}",
                    spec.username
                )));
            },
            Ok(user) => {
                let bot = Bot::from_user(&user);
                if bot.is_disabled() {
                    let bot = self
                        .platform
                        .enable_bot(&bot.user_id, session)
                        .await
                        .map_err(|e| e.context("could not enable bot"))?;
                    debug!(bot = %bot.username, "bot account re-enabled");
                    bot
                } else {
                    bot
                }
            },
        };

        // A fresh token on every provisioning; tokens are never reused.
        let token = self
            .platform
            .create_access_token(&bot.user_id, "Agora app token", session)
            .await
            .map_err(|e| e.context("could not create access token"))?;

        if acting_user_id.is_empty() {
            debug!(bot = %bot.username, "no acting user, skipping provisioning notice");
        } else if let Err(e) = self
            .platform
            .send_direct_message(
                &bot.user_id,
                acting_user_id,
                &format!("Provisioned bot account @{} (`{}`).", bot.username, bot.user_id),
            )
            .await
        {
            warn!(bot = %bot.username, error = %e, "provisioning notice failed");
        }

        Ok((bot, token))
    }
}
