//! `EventDecoder`: the `LogDecoder` implementation for EVM logs.

use indexmap::IndexMap;
use logabi_core::{
    decoder::LogDecoder,
    error::DecodeError,
    event::{EventDefinition, EventLookup},
    log::{DecodedEvent, RawLog},
    types::TypeKind,
    value::DecodedValue,
    AbiType, B256, WORD,
};
use tracing::trace;

use crate::codec::{decode_params, decode_scalar};

/// The EVM event decoder.
/// Thread-safe, cheap to clone (no heap state).
#[derive(Debug, Default, Clone)]
pub struct EventDecoder;

impl EventDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Find the event that emitted `log`.
    ///
    /// `topics[0]` is looked up first. When it is missing or unknown, the
    /// catalog's anonymous event is used, but only if its indexed parameter
    /// count accounts for every topic on the log.
    pub fn resolve<'c>(
        &self,
        lookup: &'c dyn EventLookup,
        log: &RawLog,
    ) -> Result<&'c EventDefinition, DecodeError> {
        if let Some(event) = log.selector().and_then(|s| lookup.by_selector(s)) {
            return Ok(event);
        }
        match lookup.anonymous() {
            Some(anon) if anon.indexed_count() == log.topics.len() => {
                trace!(
                    "no selector match for {:?}, falling back to anonymous {}",
                    log.selector(),
                    anon.signature()
                );
                Ok(anon)
            }
            _ => Err(DecodeError::NoMatchingEvent {
                selector: log.selector().copied(),
            }),
        }
    }

    /// Decode a single indexed topic.
    ///
    /// # EVM indexed-parameter encoding rules
    /// - **Value types** (uint, int, bool, address, bytes1–bytes32) are
    ///   stored as their 32-byte word and decode directly.
    /// - **Everything else** (string, bytes, arrays, tuples) is stored as the
    ///   keccak256 of its encoding. The value is unrecoverable, so the raw
    ///   hash is returned as [`DecodedValue::Hashed`].
    fn decode_topic(ty: &AbiType, topic: &B256) -> DecodedValue {
        match ty.kind() {
            TypeKind::Bytes
            | TypeKind::String
            | TypeKind::Array(_)
            | TypeKind::FixedArray(..)
            | TypeKind::Tuple(_) => DecodedValue::Hashed(*topic),
            _ => decode_scalar(ty, &topic.0).unwrap_or(DecodedValue::Hashed(*topic)),
        }
    }
}

impl LogDecoder for EventDecoder {
    fn decode_log(
        &self,
        lookup: &dyn EventLookup,
        log: &RawLog,
    ) -> Result<DecodedEvent, DecodeError> {
        let event = self.resolve(lookup, log)?;
        self.decode_with(event, log)
    }

    fn decode_with(
        &self,
        event: &EventDefinition,
        log: &RawLog,
    ) -> Result<DecodedEvent, DecodeError> {
        let indexed_topics: &[B256] = if event.anonymous {
            &log.topics
        } else {
            log.topics.get(1..).unwrap_or(&[])
        };

        let expected = event.indexed_count();
        if indexed_topics.len() != expected {
            return Err(DecodeError::TopicCountMismatch {
                event: event.name.clone(),
                expected,
                got: indexed_topics.len(),
            });
        }

        let mut body = decode_params(event.data_params().map(|p| &p.ty), &log.data)?.into_iter();
        let mut topics = indexed_topics.iter();

        let mut params = IndexMap::with_capacity(event.inputs.len());
        for param in &event.inputs {
            let value = if param.indexed {
                let topic = topics.next().ok_or_else(|| DecodeError::TopicCountMismatch {
                    event: event.name.clone(),
                    expected,
                    got: indexed_topics.len(),
                })?;
                Self::decode_topic(&param.ty, topic)
            } else {
                body.next().ok_or_else(|| DecodeError::TruncatedInput {
                    offset: log.data.len(),
                    needed: WORD,
                    available: 0,
                })?
            };
            if params.insert(param.name.clone(), value).is_some() {
                return Err(DecodeError::DuplicateParam {
                    event: event.name.clone(),
                    name: param.name.clone(),
                });
            }
        }

        Ok(DecodedEvent {
            name: event.name.clone(),
            signature: event.signature().to_string(),
            selector: (!event.anonymous).then(|| event.selector()),
            params,
        })
    }
}
