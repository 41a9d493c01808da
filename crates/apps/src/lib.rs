//! App domain types and contracts: manifests and provisioned [`App`]
//! records, the [`Call`] invocation shape with its [`Context`] and
//! [`Expand`] directive, the [`AppStore`] registry, and the generic
//! [`CallDispatcher`] execution path.

pub mod app;
pub mod call;
pub mod context;
pub mod dispatch;
pub mod expand;
pub mod store;
pub mod store_file;

pub use {
    app::{App, AppId, Manifest},
    call::{Call, CallResponse, CallType},
    context::{Context, ExpandedContext},
    dispatch::{CallDispatcher, NoopCallDispatcher},
    expand::{Expand, ExpandLevel},
    store::{AppStore, InMemoryAppStore},
    store_file::FileAppStore,
};
