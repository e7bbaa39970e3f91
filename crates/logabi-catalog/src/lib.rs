//! # logabi-catalog
//!
//! Turns a JSON ABI document into an immutable [`AbiCatalog`]: every event
//! is parsed into an `EventDefinition`, its canonical signature is hashed
//! into a topic[0] selector, and selector collisions between different
//! events are rejected at build time.
//!
//! The decoder only sees the `EventLookup` trait from `logabi-core`.

pub mod catalog;
pub mod json;

pub use catalog::AbiCatalog;
pub use json::{parse_events, JsonEvent, JsonParam};
