//! Decoded values.
//!
//! A [`DecodedValue`] mirrors the shape of the [`AbiType`](crate::AbiType)
//! it was decoded with. Values are produced fresh per decode call and owned
//! by the caller.

use alloy_primitives::{Address, B256, I256, U256};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    Uint(U256),
    Int(I256),
    Bool(bool),
    Address(Address),
    /// `bytesN`; always exactly N bytes
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    String(String),
    /// Fixed-size and dynamic arrays alike; the type decides the layout.
    Array(Vec<DecodedValue>),
    /// Fields in declaration order.
    Tuple(Vec<(String, DecodedValue)>),
    /// An indexed parameter of dynamic type. The log only carries the
    /// keccak256 of its encoding; the original value cannot be recovered.
    Hashed(B256),
}

impl DecodedValue {
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            DecodedValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<I256> {
        match self {
            DecodedValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            DecodedValue::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DecodedValue::Bytes(b) | DecodedValue::FixedBytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// Look up a tuple field by name.
    pub fn field(&self, name: &str) -> Option<&DecodedValue> {
        match self {
            DecodedValue::Tuple(fields) => fields.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Short variant label, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            DecodedValue::Uint(_) => "uint",
            DecodedValue::Int(_) => "int",
            DecodedValue::Bool(_) => "bool",
            DecodedValue::Address(_) => "address",
            DecodedValue::FixedBytes(_) => "fixed bytes",
            DecodedValue::Bytes(_) => "bytes",
            DecodedValue::String(_) => "string",
            DecodedValue::Array(_) => "array",
            DecodedValue::Tuple(_) => "tuple",
            DecodedValue::Hashed(_) => "hashed topic",
        }
    }

    /// JSON rendering: integers as decimal strings, addresses checksummed,
    /// byte values as 0x-hex, tuples as objects keyed by field name.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            DecodedValue::Uint(v) => Value::String(v.to_string()),
            DecodedValue::Int(v) => Value::String(v.to_dec_string()),
            DecodedValue::Bool(b) => Value::Bool(*b),
            DecodedValue::Address(a) => Value::String(a.to_checksum(None)),
            DecodedValue::FixedBytes(b) | DecodedValue::Bytes(b) => {
                Value::String(format!("0x{}", hex::encode(b)))
            }
            DecodedValue::String(s) => Value::String(s.clone()),
            DecodedValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            DecodedValue::Tuple(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            DecodedValue::Hashed(h) => Value::String(h.to_string()),
        }
    }
}

impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DecodedValue::Uint(v) => serializer.serialize_str(&v.to_string()),
            DecodedValue::Int(v) => serializer.serialize_str(&v.to_dec_string()),
            DecodedValue::Bool(b) => serializer.serialize_bool(*b),
            DecodedValue::Address(a) => serializer.serialize_str(&a.to_checksum(None)),
            DecodedValue::FixedBytes(b) | DecodedValue::Bytes(b) => {
                serializer.serialize_str(&format!("0x{}", hex::encode(b)))
            }
            DecodedValue::String(s) => serializer.serialize_str(s),
            DecodedValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DecodedValue::Tuple(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            DecodedValue::Hashed(h) => serializer.serialize_str(&h.to_string()),
        }
    }
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Uint(v) => write!(f, "{v}"),
            DecodedValue::Int(v) => write!(f, "{}", v.to_dec_string()),
            DecodedValue::Bool(v) => write!(f, "{v}"),
            DecodedValue::Address(a) => write!(f, "{}", a.to_checksum(None)),
            DecodedValue::FixedBytes(b) | DecodedValue::Bytes(b) => {
                write!(f, "0x{}", hex::encode(b))
            }
            DecodedValue::String(s) => write!(f, "{s:?}"),
            DecodedValue::Array(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            DecodedValue::Tuple(fields) => {
                let parts: Vec<_> = fields.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
            DecodedValue::Hashed(h) => write!(f, "hashed({h})"),
        }
    }
}
