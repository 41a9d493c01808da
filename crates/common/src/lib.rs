//! Shared error taxonomy and secret-handling helpers used across the Agora
//! apps crates.

pub mod error;
pub mod secrets;

pub use {
    error::{Error, Result},
    secrets::{serialize_option_secret, serialize_secret},
};
