//! Event definitions and the lookup trait the decoder resolves them through.

use crate::fingerprint::event_selector;
use crate::types::AbiType;
use alloy_primitives::B256;

/// One declared event parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: AbiType,
    /// Stored in a topic rather than in the data payload.
    pub indexed: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: AbiType, indexed: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            indexed,
        }
    }
}

/// A parsed event with its canonical signature and topic[0] selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDefinition {
    pub name: String,
    /// Parameters in declaration order (order matters for decode)
    pub inputs: Vec<Param>,
    /// Anonymous events do not emit their selector as topic[0].
    pub anonymous: bool,
    signature: String,
    selector: B256,
}

impl EventDefinition {
    pub fn new(name: impl Into<String>, inputs: Vec<Param>, anonymous: bool) -> Self {
        Self::with_hasher(name, inputs, anonymous, event_selector)
    }

    /// Build a definition whose selector is computed by `hasher` instead of
    /// keccak256.
    pub fn with_hasher(
        name: impl Into<String>,
        inputs: Vec<Param>,
        anonymous: bool,
        hasher: impl Fn(&str) -> B256,
    ) -> Self {
        let name = name.into();
        let signature = canonical_signature(&name, &inputs);
        let selector = hasher(&signature);
        Self {
            name,
            inputs,
            anonymous,
            signature,
            selector,
        }
    }

    /// `Name(type1,type2,...)`; indexed flags are not part of it.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn selector(&self) -> B256 {
        self.selector
    }

    /// Indexed parameters (topics[1..], or topics[0..] when anonymous).
    pub fn indexed_params(&self) -> impl Iterator<Item = &Param> {
        self.inputs.iter().filter(|p| p.indexed)
    }

    /// Non-indexed parameters (the data payload).
    pub fn data_params(&self) -> impl Iterator<Item = &Param> {
        self.inputs.iter().filter(|p| !p.indexed)
    }

    pub fn indexed_count(&self) -> usize {
        self.indexed_params().count()
    }

    /// Number of topics a log of this event carries.
    pub fn topic_count(&self) -> usize {
        self.indexed_count() + usize::from(!self.anonymous)
    }
}

/// Canonical signature string of an event.
pub fn canonical_signature(name: &str, inputs: &[Param]) -> String {
    let types: Vec<String> = inputs.iter().map(|p| p.ty.to_string()).collect();
    format!("{name}({})", types.join(","))
}

/// A thread-safe, read-only view of an event catalog.
/// The concrete implementation lives in `logabi-catalog`.
pub trait EventLookup: Send + Sync {
    /// Look up a non-anonymous event by its topic[0] selector.
    fn by_selector(&self, selector: &B256) -> Option<&EventDefinition>;

    /// The anonymous event usable for logs whose topic[0] matches nothing.
    fn anonymous(&self) -> Option<&EventDefinition>;
}
