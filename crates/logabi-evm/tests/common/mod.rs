//! Proptest strategies shared by the integration tests.

#![allow(dead_code)]

use logabi_core::{AbiType, Address, DecodedValue, TypeKind, I256, U256};
use proptest::prelude::*;

/// Any well-formed type, nested at most a few levels deep.
pub fn arb_type() -> impl Strategy<Value = AbiType> {
    let leaf = prop_oneof![
        (1u16..=32).prop_map(|n| AbiType::uint(n * 8).unwrap()),
        (1u16..=32).prop_map(|n| AbiType::int(n * 8).unwrap()),
        Just(AbiType::bool()),
        Just(AbiType::address()),
        (1u8..=32).prop_map(|n| AbiType::fixed_bytes(n).unwrap()),
        Just(AbiType::bytes()),
        Just(AbiType::string()),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(AbiType::array),
            (inner.clone(), 1usize..=3).prop_map(|(t, n)| AbiType::fixed_array(t, n).unwrap()),
            prop::collection::vec(inner, 1..=4).prop_map(|ts| {
                AbiType::tuple(ts.into_iter().map(|t| (String::new(), t)).collect()).unwrap()
            }),
        ]
    })
}

/// A value that is in range for `ty`.
pub fn arb_value(ty: &AbiType) -> BoxedStrategy<DecodedValue> {
    match ty.kind() {
        TypeKind::Uint(bits) => {
            let shift = 256 - usize::from(*bits);
            any::<[u8; 32]>()
                .prop_map(move |b| DecodedValue::Uint(U256::from_be_bytes(b) >> shift))
                .boxed()
        }
        TypeKind::Int(bits) => {
            let shift = 256 - usize::from(*bits);
            any::<[u8; 32]>()
                .prop_map(move |b| {
                    DecodedValue::Int(I256::from_raw(U256::from_be_bytes(b) << shift).asr(shift))
                })
                .boxed()
        }
        TypeKind::Bool => any::<bool>().prop_map(DecodedValue::Bool).boxed(),
        TypeKind::Address => any::<[u8; 20]>()
            .prop_map(|b| DecodedValue::Address(Address::from(b)))
            .boxed(),
        TypeKind::FixedBytes(n) => {
            let n = usize::from(*n);
            prop::collection::vec(any::<u8>(), n..=n)
                .prop_map(DecodedValue::FixedBytes)
                .boxed()
        }
        TypeKind::Bytes => prop::collection::vec(any::<u8>(), 0..80)
            .prop_map(DecodedValue::Bytes)
            .boxed(),
        TypeKind::String => "\\PC{0,40}".prop_map(DecodedValue::String).boxed(),
        TypeKind::Array(elem) => prop::collection::vec(arb_value(elem), 0..4)
            .prop_map(DecodedValue::Array)
            .boxed(),
        TypeKind::FixedArray(elem, n) => prop::collection::vec(arb_value(elem), *n..=*n)
            .prop_map(DecodedValue::Array)
            .boxed(),
        TypeKind::Tuple(fields) => {
            let names: Vec<String> = fields.iter().map(|(n, _)| n.clone()).collect();
            let values: Vec<_> = fields.iter().map(|(_, t)| arb_value(t)).collect();
            values
                .prop_map(move |vs| DecodedValue::Tuple(names.iter().cloned().zip(vs).collect()))
                .boxed()
        }
    }
}

/// A parameter list with matching values.
pub fn arb_params() -> impl Strategy<Value = (Vec<AbiType>, Vec<DecodedValue>)> {
    prop::collection::vec(arb_type(), 1..=4).prop_flat_map(|types| {
        let values: Vec<_> = types.iter().map(arb_value).collect();
        (Just(types), values)
    })
}
