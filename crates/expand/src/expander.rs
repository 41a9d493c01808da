use std::sync::Arc;

use {
    agora_apps::{App, AppStore, Context, Expand, ExpandLevel, ExpandedContext},
    agora_common::Result,
    agora_platform::{Channel, ConfigSource, PlatformClient, Post, Team, User},
    tracing::debug,
};

use crate::redact;

/// Resolution state of one expandable field inside the working copy.
///
/// `Pending` marks a field a directive asked for whose fetch has not yet
/// succeeded, so a failed expansion retries on the next call while a
/// successful one never refetches.
#[derive(Debug, Clone, Default, PartialEq)]
enum Slot<T> {
    #[default]
    Unrequested,
    Pending,
    Resolved(T),
}

impl<T> Slot<T> {
    fn seed(value: Option<T>) -> Self {
        value.map_or(Self::Unrequested, Self::Resolved)
    }

    fn resolved(&self) -> Option<&T> {
        match self {
            Self::Resolved(value) => Some(value),
            _ => None,
        }
    }

    fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

#[derive(Default)]
struct Slots {
    acting_user: Slot<User>,
    app: Slot<App>,
    channel: Slot<Channel>,
    post: Slot<Post>,
    root_post: Slot<Post>,
    team: Slot<Team>,
    user: Slot<User>,
}

/// Populates a context according to an [`Expand`] directive.
///
/// The expander owns a working copy of the context and a per-field cache, so
/// the same underlying context can be expanded repeatedly with different
/// directives without repeating successful fetches, and the caller's
/// original value is never mutated.
pub struct Expander {
    context: Context,
    slots: Slots,
    platform: Arc<dyn PlatformClient>,
    store: Arc<dyn AppStore>,
    config: Arc<dyn ConfigSource>,
}

impl Expander {
    /// Snapshot `context` and pre-seed the field cache from whatever its
    /// event constructor attached.
    #[must_use]
    pub fn new(
        mut context: Context,
        platform: Arc<dyn PlatformClient>,
        store: Arc<dyn AppStore>,
        config: Arc<dyn ConfigSource>,
    ) -> Self {
        let expanded = std::mem::take(&mut context.expanded);
        let slots = Slots {
            acting_user: Slot::seed(expanded.acting_user),
            app: Slot::seed(expanded.app),
            channel: Slot::seed(expanded.channel),
            post: Slot::seed(expanded.post),
            root_post: Slot::seed(expanded.root_post),
            team: Slot::seed(expanded.team),
            user: Slot::seed(expanded.user),
        };
        Self {
            context,
            slots,
            platform,
            store,
            config,
        }
    }

    /// Expand per `directive` and return a fresh, redacted context.
    ///
    /// `None` means the caller asked for nothing back: the returned context
    /// carries an empty expanded payload regardless of what was attached.
    /// Resolution is all-or-nothing: the first failing fetch (in the order
    /// acting user, app, channel, config, post, root post, team, user)
    /// aborts the operation and no partial payload surfaces.
    pub async fn expand(&mut self, directive: Option<&Expand>) -> Result<Context> {
        let mut result = self.context.clone();
        result.expanded = ExpandedContext::default();
        let Some(directive) = directive else {
            return Ok(result);
        };

        self.resolve(directive).await?;

        result.expanded = ExpandedContext {
            acting_user: redact::user(self.slots.acting_user.resolved(), directive.acting_user),
            app: redact::app(self.slots.app.resolved(), directive.app),
            channel: redact::channel(self.slots.channel.resolved(), directive.channel),
            config: redact::config(&self.config.sanitized(), directive.config),
            mentioned: Vec::new(),
            post: redact::post(self.slots.post.resolved(), directive.post),
            root_post: redact::post(self.slots.root_post.resolved(), directive.root_post),
            team: redact::team(self.slots.team.resolved(), directive.team),
            user: redact::user(self.slots.user.resolved(), directive.user),
        };
        Ok(result)
    }

    /// Fetch every requested, identified, not-yet-resolved field, one entity
    /// at a time, aborting on the first failure.
    async fn resolve(&mut self, directive: &Expand) -> Result<()> {
        if wants(directive.acting_user, &self.context.acting_user_id)
            && !self.slots.acting_user.is_resolved()
        {
            self.slots.acting_user = Slot::Pending;
            let id = self.context.acting_user_id.clone();
            let user = self
                .platform
                .get_user(&id)
                .await
                .map_err(|e| e.context(format!("failed to expand acting user {id}")))?;
            self.slots.acting_user = Slot::Resolved(user);
        }

        if wants(directive.app, self.context.app_id.as_str()) && !self.slots.app.is_resolved() {
            self.slots.app = Slot::Pending;
            let id = self.context.app_id.clone();
            let app = self
                .store
                .load_app(&id)
                .await
                .map_err(|e| e.context(format!("failed to expand app {id}")))?;
            self.slots.app = Slot::Resolved(app);
        }

        if wants(directive.channel, &self.context.channel_id) && !self.slots.channel.is_resolved()
        {
            self.slots.channel = Slot::Pending;
            let id = self.context.channel_id.clone();
            let channel = self
                .platform
                .get_channel(&id)
                .await
                .map_err(|e| e.context(format!("failed to expand channel {id}")))?;
            self.slots.channel = Slot::Resolved(channel);
        }

        // Config has no slot: the sanitized snapshot is re-read on every
        // expansion and costs no fetch.

        if wants(directive.post, &self.context.post_id) && !self.slots.post.is_resolved() {
            self.slots.post = Slot::Pending;
            let id = self.context.post_id.clone();
            let post = self
                .platform
                .get_post(&id)
                .await
                .map_err(|e| e.context(format!("failed to expand post {id}")))?;
            self.slots.post = Slot::Resolved(post);
        }

        if wants(directive.root_post, &self.context.root_post_id)
            && !self.slots.root_post.is_resolved()
        {
            self.slots.root_post = Slot::Pending;
            let id = self.context.root_post_id.clone();
            let post = self
                .platform
                .get_post(&id)
                .await
                .map_err(|e| e.context(format!("failed to expand root post {id}")))?;
            self.slots.root_post = Slot::Resolved(post);
        }

        if wants(directive.team, &self.context.team_id) && !self.slots.team.is_resolved() {
            self.slots.team = Slot::Pending;
            let id = self.context.team_id.clone();
            let team = self
                .platform
                .get_team(&id)
                .await
                .map_err(|e| e.context(format!("failed to expand team {id}")))?;
            self.slots.team = Slot::Resolved(team);
        }

        if wants(directive.user, &self.context.user_id) && !self.slots.user.is_resolved() {
            self.slots.user = Slot::Pending;
            let id = self.context.user_id.clone();
            let user = self
                .platform
                .get_user(&id)
                .await
                .map_err(|e| e.context(format!("failed to expand user {id}")))?;
            self.slots.user = Slot::Resolved(user);
        }

        debug!(app_id = %self.context.app_id, "context resolved");
        Ok(())
    }
}

fn wants(level: ExpandLevel, id: &str) -> bool {
    !level.is_none() && !id.is_empty()
}
