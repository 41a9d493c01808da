//! The context expansion engine: turns an ID-only event context into a
//! populated, privacy-filtered object graph, fetching each entity at most
//! once per context.

mod expander;
mod redact;

pub use expander::Expander;
