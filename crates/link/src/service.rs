use std::sync::Arc;

use {
    agora_apps::{App, AppId, Call, CallDispatcher, CallResponse},
    agora_common::{Error, Result},
    agora_platform::{PlatformClient, SiteConfig},
    tracing::{debug, warn},
    url::Url,
    uuid::Uuid,
};

use crate::{
    config::OAuthAppConfig,
    payload::LinkPayload,
    pending::{PendingLink, PendingLinkStore},
    tokens::{LinkedToken, UserTokenStore},
};

/// Drives third-party OAuth2 linking for one app.
///
/// `start` parks the caller's resume [`Call`] as serialized pending state
/// and hands back the consent URL; `finish` consumes the pending state
/// exactly once, re-executes the parked call, and notifies the user. The
/// process may restart between the two; the stored payload is all that is
/// needed to resume.
pub struct LinkService {
    app_id: AppId,
    bot_user_id: String,
    config: OAuthAppConfig,
    pending: Arc<dyn PendingLinkStore>,
    tokens: Arc<dyn UserTokenStore>,
    dispatcher: Arc<dyn CallDispatcher>,
    platform: Arc<dyn PlatformClient>,
}

impl std::fmt::Debug for LinkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkService")
            .field("app_id", &self.app_id)
            .field("bot_user_id", &self.bot_user_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LinkService {
    /// Build the service for a provisioned app. Fails `Validation` when the
    /// app carries no OAuth2 client credentials or the site URL is
    /// malformed.
    pub fn init(
        app: &App,
        site: &SiteConfig,
        pending: Arc<dyn PendingLinkStore>,
        tokens: Arc<dyn UserTokenStore>,
        dispatcher: Arc<dyn CallDispatcher>,
        platform: Arc<dyn PlatformClient>,
    ) -> Result<Self> {
        let config = OAuthAppConfig::for_app(app, site)?;
        Ok(Self {
            app_id: app.manifest.app_id.clone(),
            bot_user_id: app.bot_user_id.clone(),
            config,
            pending,
            tokens,
            dispatcher,
            platform,
        })
    }

    /// Park `resume_call` for `user_id` and return the provider consent URL
    /// to redirect the user to.
    ///
    /// The serialized payload is the entire continuation; the one-time nonce
    /// rides along as the OAuth `state` parameter and is the only thing that
    /// can later redeem the attempt.
    pub async fn start(&self, user_id: &str, resume_call: Call) -> Result<String> {
        if user_id.is_empty() {
            return Err(Error::validation("user id must not be empty"));
        }

        let nonce = Uuid::new_v4().to_string();
        let payload = LinkPayload::new(nonce.clone(), resume_call);
        let bytes = payload.encode()?;
        self.pending
            .put(PendingLink::new(user_id, nonce.clone(), bytes))
            .await?;

        let mut url = Url::parse(&self.config.authorize_url)
            .map_err(|e| Error::validation(format!("invalid authorize url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("state", &nonce);

        debug!(user_id, app_id = %self.app_id, "link started");
        Ok(url.to_string())
    }

    /// Resume the parked call after the provider handed back `token`.
    ///
    /// The payload must decode and match the nonce of the user's current
    /// pending attempt; the attempt is consumed either way, so a stale or
    /// replayed payload can never re-execute the call. Delivery of the
    /// result notice is best-effort.
    pub async fn finish(
        &self,
        user_id: &str,
        token: LinkedToken,
        payload: &[u8],
    ) -> Result<CallResponse> {
        let decoded = match LinkPayload::decode(payload) {
            Ok(p) => p,
            Err(e) => {
                // Never leave a stuck pending reference behind.
                if let Err(take_err) = self.pending.take(user_id).await {
                    warn!(user_id, error = %take_err, "failed to clear pending link");
                }
                warn!(user_id, error = %e, "link payload did not decode, dropping attempt");
                return Err(e);
            },
        };

        let Some(pending) = self.pending.take(user_id).await? else {
            return Err(Error::not_found(format!("no pending link for user {user_id}")));
        };
        if pending.nonce != decoded.nonce {
            return Err(Error::conflict(
                "link payload does not match the pending attempt",
            ));
        }

        self.tokens.put(user_id, &token).await?;

        let mut call = decoded.call;
        call.context.app_id = self.app_id.clone();
        let recipient = if call.context.acting_user_id.is_empty() {
            user_id.to_string()
        } else {
            call.context.acting_user_id.clone()
        };

        let response = self.dispatcher.execute(call).await?;
        debug!(user_id, app_id = %self.app_id, "link resume call dispatched");

        if let Err(e) = self
            .platform
            .send_direct_message(&self.bot_user_id, &recipient, &response.markdown)
            .await
        {
            warn!(user_id, error = %e, "link completion notice failed");
        }

        Ok(response)
    }
}
