//! Runtime head/tail ABI codec.

pub mod decode;
pub mod encode;
mod word;

pub use decode::{decode, decode_params, decode_scalar};
pub use encode::{encode, encode_params};
