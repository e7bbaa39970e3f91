//! # logabi-core
//!
//! Core types shared across all logabi crates: the runtime ABI type
//! descriptor and its grammar, decoded values, event definitions, raw and
//! decoded logs, the keccak-256 signature hasher and the error taxonomy.
//! The catalog, codec and batch engine are all built on top of the
//! interfaces defined here.

pub mod decoder;
pub mod error;
pub mod event;
pub mod fingerprint;
pub mod log;
pub mod types;
pub mod value;

pub use decoder::{ErrorMode, LogDecoder, ProgressCallback};
pub use error::{BatchDecodeError, CatalogError, DecodeError, EncodeError, TypeError};
pub use event::{EventDefinition, EventLookup, Param};
pub use fingerprint::{event_selector, keccak256};
pub use log::{DecodedEvent, RawLog};
pub use types::{AbiType, TypeKind};
pub use value::DecodedValue;

/// Re-exported so downstream crates share one set of primitive types.
pub use alloy_primitives::{Address, B256, I256, U256};

/// Size of one ABI word (and of one log topic) in bytes.
pub const WORD: usize = 32;
