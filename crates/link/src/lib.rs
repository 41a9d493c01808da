//! Per-user third-party OAuth2 linking that survives the redirect round
//! trip: the "what happens after linking" continuation is serialized into a
//! versioned payload and parked as single-use pending state, never held as
//! an in-process closure.

pub mod config;
pub mod payload;
pub mod pending;
pub mod service;
pub mod tokens;

pub use {
    config::OAuthAppConfig,
    payload::{LinkPayload, PAYLOAD_VERSION},
    pending::{FilePendingLinkStore, InMemoryPendingLinkStore, PendingLink, PendingLinkStore},
    service::LinkService,
    tokens::{FileUserTokenStore, LinkedToken, UserTokenStore},
};
