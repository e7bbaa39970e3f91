//! Raw and decoded log types.

use crate::value::DecodedValue;
use alloy_primitives::{Address, B256, U64};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A raw, undecoded log as handed over by whatever fetched it.
///
/// Deserializes from the JSON-RPC log shape
/// (`{"topics": ["0x…"], "data": "0x…", ...}`); the metadata fields are
/// carried through untouched and never influence decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    /// topics[0] is the event selector (unless anonymous); the rest are
    /// indexed parameters.
    pub topics: Vec<B256>,
    /// ABI-encoded non-indexed parameters. Any length is accepted.
    #[serde(with = "hex_data", default)]
    pub data: Vec<u8>,
    /// Contract that emitted the log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<B256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_index: Option<U64>,
}

impl RawLog {
    pub fn new(topics: Vec<B256>, data: Vec<u8>) -> Self {
        Self {
            topics,
            data,
            ..Default::default()
        }
    }

    /// topics[0], if present.
    pub fn selector(&self) -> Option<&B256> {
        self.topics.first()
    }
}

/// A fully decoded log, the primary output of logabi.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedEvent {
    /// Event name as declared in the ABI, e.g. "Transfer"
    pub name: String,
    /// Canonical signature, e.g. "Transfer(address,address,uint256)"
    pub signature: String,
    /// The topic[0] that matched; `None` for anonymous events
    pub selector: Option<B256>,
    /// Decoded values keyed by parameter name, in declaration order
    pub params: IndexMap<String, DecodedValue>,
}

impl DecodedEvent {
    /// Get a parameter value by name.
    pub fn param(&self, name: &str) -> Option<&DecodedValue> {
        self.params.get(name)
    }

    /// `{"name": ..., "data": {param: value, ...}}`
    pub fn to_json(&self) -> serde_json::Value {
        let data: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        serde_json::json!({
            "name": self.name,
            "data": data,
        })
    }
}

/// 0x-prefixed hex (de)serialization for byte payloads.
mod hex_data {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(data)))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix("0x").unwrap_or(&s);
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    const RPC_LOG: &str = r#"{
        "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
        "topics": [
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
            "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045"
        ],
        "data": "0x00000000000000000000000000000000000000000000000000000000000003e8",
        "blockNumber": "0x121eac0",
        "transactionHash": "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060",
        "logIndex": "0x2",
        "removed": false
    }"#;

    #[test]
    fn raw_log_from_rpc_json() {
        let log: RawLog = serde_json::from_str(RPC_LOG).unwrap();
        assert_eq!(log.topics.len(), 2);
        assert_eq!(log.data.len(), 32);
        assert_eq!(log.data[30..], [0x03, 0xe8]);
        assert_eq!(log.block_number, Some(U64::from(0x121eac0u64)));
        assert_eq!(log.log_index, Some(U64::from(2u64)));
        assert!(log.address.is_some());
    }

    #[test]
    fn raw_log_serde_roundtrip() {
        let log = RawLog::new(vec![B256::repeat_byte(1)], vec![1, 2, 3]);
        let json = serde_json::to_string(&log).unwrap();
        let back: RawLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn decoded_event_json_keeps_declaration_order() {
        let mut params = IndexMap::new();
        params.insert("to".to_string(), DecodedValue::Bool(true));
        params.insert("amount".to_string(), DecodedValue::Uint(U256::from(7u64)));
        let event = DecodedEvent {
            name: "Mint".into(),
            signature: "Mint(bool,uint256)".into(),
            selector: None,
            params,
        };
        let json = event.to_json();
        assert_eq!(json["name"], "Mint");
        let keys: Vec<_> = json["data"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["to", "amount"]);
        assert_eq!(json["data"]["amount"], "7");
    }
}
