//! Event signature hashing.
//!
//! The selector of an EVM event is the keccak256 hash of its canonical
//! signature string, e.g.:
//!   keccak256("Swap(address,address,int256,int256,uint160,uint128,int24)")
//!   → 0xc42079f94a6350d7e6235f29174924f928cc2ac818eb64fed8004e115fbcca67
//!
//! For raw logs, topics[0] IS the selector; it is only recomputed when a
//! catalog is built.

use alloy_primitives::B256;
use tiny_keccak::{Hasher, Keccak};

/// Keccak-256 (the pre-standard variant used by Ethereum, not SHA3-256).
pub fn keccak256(data: &[u8]) -> B256 {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    B256::from(output)
}

/// Compute the topic[0] selector of a canonical event signature
/// (`"EventName(type1,type2,...)"`).
pub fn event_selector(signature: &str) -> B256 {
    keccak256(signature.as_bytes())
}
