//! # logabi-evm
//!
//! EVM ABI codec and event-log decoder implementing the `LogDecoder` trait.
//!
//! ## Implementation notes
//! - `topics[0]` → event selector (keccak256 of the canonical signature),
//!   absent for anonymous events
//! - `topics[1..]` → indexed parameters, one 32-byte word each; non-value
//!   types only carry the hash of their encoding
//! - `data` → non-indexed parameters, head/tail encoded as one region
//! - All bounds are checked against the input; malformed logs fail with a
//!   typed `DecodeError` and never panic

pub mod codec;
pub mod decoder;

pub use codec::{decode, decode_params, encode, encode_params};
pub use decoder::EventDecoder;
