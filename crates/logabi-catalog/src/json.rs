//! JSON ABI document model.
//!
//! Only `event` entries are turned into definitions; functions, errors,
//! constructors, fallback and receive entries are skipped. Per the Solidity
//! ABI convention an entry without `type` is a function.

use logabi_core::{
    error::CatalogError,
    event::{EventDefinition, Param},
    types::AbiType,
    B256,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─── Raw serde types ──────────────────────────────────────────────────────────

/// One `event` entry of a JSON ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonEvent {
    pub name: String,
    pub inputs: Vec<JsonParam>,
    #[serde(default)]
    pub anonymous: bool,
}

/// An event input (or a tuple component).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonParam {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    /// Only meaningful on top-level event inputs.
    #[serde(default)]
    pub indexed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<JsonParam>>,
    #[serde(default, rename = "internalType", skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
}

impl JsonParam {
    /// Resolve the declared type, recursing into `components`.
    pub fn resolve(&self) -> Result<AbiType, CatalogError> {
        let components = match &self.components {
            Some(list) => Some(
                list.iter()
                    .map(|c| Ok((c.name.clone(), c.resolve()?)))
                    .collect::<Result<Vec<_>, CatalogError>>()?,
            ),
            None => None,
        };
        Ok(AbiType::from_components(&self.ty, components)?)
    }
}

impl JsonEvent {
    /// Build the event definition. `index` is the entry's position in the
    /// ABI array and is only used for error reporting.
    pub fn to_definition(
        &self,
        index: usize,
        hasher: &dyn Fn(&str) -> B256,
    ) -> Result<EventDefinition, CatalogError> {
        if self.name.is_empty() {
            return Err(CatalogError::MalformedAbiEntry {
                index,
                reason: "event name is empty".into(),
            });
        }

        let mut params: Vec<Param> = Vec::with_capacity(self.inputs.len());
        for (pos, input) in self.inputs.iter().enumerate() {
            let name = if input.name.is_empty() {
                pos.to_string()
            } else {
                input.name.clone()
            };
            if params.iter().any(|p| p.name == name) {
                return Err(CatalogError::MalformedAbiEntry {
                    index,
                    reason: format!("event '{}' declares parameter '{name}' twice", self.name),
                });
            }
            params.push(Param::new(name, input.resolve()?, input.indexed));
        }

        Ok(EventDefinition::with_hasher(
            self.name.clone(),
            params,
            self.anonymous,
            hasher,
        ))
    }
}

// ─── Document parsing ─────────────────────────────────────────────────────────

/// Extract the `event` entries of an ABI document, paired with their
/// position in the ABI array.
///
/// Accepts a plain ABI array or a build artifact of the form
/// `{"abi": [...]}`.
pub fn parse_events(json: &str) -> Result<Vec<(usize, JsonEvent)>, CatalogError> {
    let document: Value = serde_json::from_str(json)?;
    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("abi") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(CatalogError::InvalidDocument {
                    reason: "expected a JSON array or an object with an 'abi' array".into(),
                })
            }
        },
        _ => {
            return Err(CatalogError::InvalidDocument {
                reason: "expected a JSON array of ABI entries".into(),
            })
        }
    };

    let mut events = Vec::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let kind = match &entry {
            Value::Object(map) => match map.get("type") {
                None => "function",
                Some(Value::String(s)) => s.as_str(),
                Some(_) => {
                    return Err(CatalogError::MalformedAbiEntry {
                        index,
                        reason: "'type' must be a string".into(),
                    })
                }
            },
            _ => {
                return Err(CatalogError::MalformedAbiEntry {
                    index,
                    reason: "ABI entry must be an object".into(),
                })
            }
        };
        if kind != "event" {
            continue;
        }

        let event: JsonEvent =
            serde_json::from_value(entry).map_err(|e| CatalogError::MalformedAbiEntry {
                index,
                reason: e.to_string(),
            })?;
        events.push((index, event));
    }
    Ok(events)
}
