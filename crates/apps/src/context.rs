use std::collections::HashMap;

use {
    agora_platform::{Channel, ChannelMember, Post, SiteConfig, Team, TeamMember, User},
    serde::{Deserialize, Serialize},
};

use crate::app::{App, AppId};

/// Identifies who/where/what for one app invocation.
///
/// The flat ID fields always travel; resolved objects ride in [`expanded`]
/// only when an expand directive asked for them. Every ID is either empty or
/// refers to a real entity, and when the matching expanded object is
/// attached its identity fields agree with the flat IDs. The event
/// constructors below are the only places that pre-seed `expanded`.
///
/// [`expanded`]: Context::expanded
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    pub app_id: AppId,
    /// Path within the app's UI surface that triggered the call.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub acting_user_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    pub team_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub post_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub root_post_id: String,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub props: HashMap<String, String>,
    #[serde(flatten)]
    pub expanded: ExpandedContext,
}

/// Objects resolved by expansion (or pre-seeded by an event constructor),
/// already redacted to the requested level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandedContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acting_user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<App>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<SiteConfig>,
    /// Carried on the wire for forward compatibility; the expansion engine
    /// never populates it.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mentioned: Vec<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_post: Option<Post>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl ExpandedContext {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.acting_user.is_none()
            && self.app.is_none()
            && self.channel.is_none()
            && self.config.is_none()
            && self.mentioned.is_empty()
            && self.post.is_none()
            && self.root_post.is_none()
            && self.team.is_none()
            && self.user.is_none()
    }
}

impl Context {
    #[must_use]
    pub fn get_prop(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    pub fn set_prop(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.props.insert(name.into(), value.into());
    }

    // ── Event constructors ──────────────────────────────────────────────────
    //
    // One constructor per domain event. Each fills exactly the relevant flat
    // IDs and pre-seeds exactly one expanded field with the triggering
    // object, so a later expansion reuses it instead of refetching.

    #[must_use]
    pub fn channel_created(channel: &Channel) -> Self {
        Self {
            user_id: channel.creator_id.clone(),
            channel_id: channel.id.clone(),
            team_id: channel.team_id.clone(),
            expanded: ExpandedContext {
                channel: Some(channel.clone()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[must_use]
    pub fn post_created(post: &Post) -> Self {
        Self {
            user_id: post.user_id.clone(),
            post_id: post.id.clone(),
            root_post_id: post.root_id.clone(),
            channel_id: post.channel_id.clone(),
            expanded: ExpandedContext {
                post: Some(post.clone()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[must_use]
    pub fn user_created(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            expanded: ExpandedContext {
                user: Some(user.clone()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// `acting_user` is `None` for system-triggered membership changes.
    #[must_use]
    pub fn team_member_changed(member: &TeamMember, acting_user: Option<&User>) -> Self {
        Self {
            acting_user_id: acting_user.map(|u| u.id.clone()).unwrap_or_default(),
            user_id: member.user_id.clone(),
            team_id: member.team_id.clone(),
            expanded: ExpandedContext {
                acting_user: acting_user.cloned(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// `acting_user` is `None` for system-triggered membership changes.
    #[must_use]
    pub fn channel_member_changed(member: &ChannelMember, acting_user: Option<&User>) -> Self {
        Self {
            acting_user_id: acting_user.map(|u| u.id.clone()).unwrap_or_default(),
            user_id: member.user_id.clone(),
            channel_id: member.channel_id.clone(),
            expanded: ExpandedContext {
                acting_user: acting_user.cloned(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
