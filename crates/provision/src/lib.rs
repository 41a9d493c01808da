//! Idempotent app provisioning: ensure a bot identity and a fresh access
//! token exist for an app, then persist the record.

mod locks;
mod service;

pub use service::{ProvisionRequest, ProvisionService};
