//! Per-type redaction applied after resolution.
//!
//! Summary whitelists are fixed; anything not listed stays behind. The app
//! record never surfaces its app-level secret or OAuth2 client secret, at
//! any level.

use {
    agora_apps::{App, ExpandLevel},
    agora_platform::{Channel, Post, SiteConfig, Team, User},
};

pub(crate) fn user(user: Option<&User>, level: ExpandLevel) -> Option<User> {
    let user = user?;
    match level {
        ExpandLevel::All => Some(user.clone()),
        ExpandLevel::Summary => Some(User {
            id: user.id.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            nickname: user.nickname.clone(),
            email: user.email.clone(),
            locale: user.locale.clone(),
            timezone: user.timezone.clone(),
            roles: user.roles.clone(),
            is_bot: user.is_bot,
            bot_description: user.bot_description.clone(),
            delete_at: user.delete_at,
            ..Default::default()
        }),
        _ => None,
    }
}

pub(crate) fn channel(channel: Option<&Channel>, level: ExpandLevel) -> Option<Channel> {
    let channel = channel?;
    match level {
        ExpandLevel::All => Some(channel.clone()),
        ExpandLevel::Summary => Some(Channel {
            id: channel.id.clone(),
            delete_at: channel.delete_at,
            team_id: channel.team_id.clone(),
            channel_type: channel.channel_type.clone(),
            display_name: channel.display_name.clone(),
            name: channel.name.clone(),
            ..Default::default()
        }),
        _ => None,
    }
}

pub(crate) fn team(team: Option<&Team>, level: ExpandLevel) -> Option<Team> {
    let team = team?;
    match level {
        ExpandLevel::All => Some(team.clone()),
        ExpandLevel::Summary => Some(Team {
            id: team.id.clone(),
            display_name: team.display_name.clone(),
            name: team.name.clone(),
            description: team.description.clone(),
            email: team.email.clone(),
            team_type: team.team_type.clone(),
            ..Default::default()
        }),
        _ => None,
    }
}

pub(crate) fn post(post: Option<&Post>, level: ExpandLevel) -> Option<Post> {
    let post = post?;
    match level {
        ExpandLevel::All => Some(post.clone()),
        ExpandLevel::Summary => Some(Post {
            id: post.id.clone(),
            post_type: post.post_type.clone(),
            user_id: post.user_id.clone(),
            channel_id: post.channel_id.clone(),
            root_id: post.root_id.clone(),
            message: post.message.clone(),
            ..Default::default()
        }),
        _ => None,
    }
}

/// Summary and All are equivalent for the app record; both strip the two
/// fields that are never returned.
pub(crate) fn app(app: Option<&App>, level: ExpandLevel) -> Option<App> {
    let app = app?;
    match level {
        ExpandLevel::Summary | ExpandLevel::All => {
            let mut app = app.clone();
            app.secret = None;
            app.manifest.oauth2_client_secret = None;
            Some(app)
        },
        _ => None,
    }
}

pub(crate) fn config(config: &SiteConfig, level: ExpandLevel) -> Option<SiteConfig> {
    match level {
        ExpandLevel::Summary | ExpandLevel::All => Some(config.clone()),
        _ => None,
    }
}
