//! Platform data model and the consumed contracts onto the host platform:
//! the identity gateway ([`PlatformClient`]) and the sanitized configuration
//! snapshot ([`ConfigSource`]).

pub mod client;
pub mod types;

pub use {
    client::{ConfigSource, NoopPlatformClient, PlatformClient, StaticConfigSource},
    types::{
        AccessToken, Bot, BotSpec, Channel, ChannelMember, Post, SessionToken, SiteConfig, Team,
        TeamMember, User,
    },
};
