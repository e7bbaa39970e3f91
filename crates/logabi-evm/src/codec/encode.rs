//! ABI encoder, the inverse of [`decode`](super::decode).
//!
//! Produces the canonical head/tail layout: offsets point at the smallest
//! legal position (tails are packed in declaration order) and every payload
//! is right-padded with zeros to a word boundary. Decoding accepts any
//! layout whose offsets resolve in bounds, so `decode(encode(v)) == v` holds
//! but the converse only holds for canonical input.
//!
//! # Usage
//! ```ignore
//! let ty = AbiType::parse("(string,uint8)")?;
//! let bytes = encode(&ty, &DecodedValue::Tuple(fields))?;
//! ```

use logabi_core::{AbiType, DecodedValue, EncodeError, TypeKind, U256, WORD};

use super::word::{int_mask, sign_extend, usize_word};

/// Encode a single value as a one-element parameter list.
pub fn encode(ty: &AbiType, value: &DecodedValue) -> Result<Vec<u8>, EncodeError> {
    encode_params(&[ty], std::slice::from_ref(value))
}

/// Encode an ordered parameter list as one region.
pub fn encode_params(types: &[&AbiType], values: &[DecodedValue]) -> Result<Vec<u8>, EncodeError> {
    if types.len() != values.len() {
        return Err(EncodeError::TypeMismatch {
            expected: format!("{} values", types.len()),
            got: format!("{} values", values.len()),
        });
    }
    let items: Vec<_> = types.iter().copied().zip(values).collect();
    let mut out = Vec::new();
    encode_region(&items, &mut out)?;
    Ok(out)
}

fn encode_region(items: &[(&AbiType, &DecodedValue)], out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let head_len: usize = items.iter().map(|(t, _)| t.head_size()).sum();
    let mut heads = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for &(ty, value) in items {
        if ty.is_dynamic() {
            heads.extend_from_slice(&usize_word(head_len + tail.len()));
            encode_value(ty, value, &mut tail)?;
        } else {
            encode_value(ty, value, &mut heads)?;
        }
    }

    out.extend_from_slice(&heads);
    out.extend_from_slice(&tail);
    Ok(())
}

fn encode_value(ty: &AbiType, value: &DecodedValue, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    match (ty.kind(), value) {
        (TypeKind::Uint(bits), DecodedValue::Uint(v)) => {
            if *v > int_mask(*bits) {
                return Err(out_of_range(ty));
            }
            out.extend_from_slice(&v.to_be_bytes::<WORD>());
        }
        (TypeKind::Int(bits), DecodedValue::Int(v)) => {
            if sign_extend(v.into_raw() & int_mask(*bits), *bits) != *v {
                return Err(out_of_range(ty));
            }
            out.extend_from_slice(&v.into_raw().to_be_bytes::<WORD>());
        }
        (TypeKind::Bool, DecodedValue::Bool(b)) => {
            out.extend_from_slice(&U256::from(u8::from(*b)).to_be_bytes::<WORD>());
        }
        (TypeKind::Address, DecodedValue::Address(a)) => {
            out.extend_from_slice(&[0u8; WORD - 20]);
            out.extend_from_slice(a.as_slice());
        }
        (TypeKind::FixedBytes(n), DecodedValue::FixedBytes(b)) => {
            if b.len() != usize::from(*n) {
                return Err(out_of_range(ty));
            }
            write_padded(b, out);
        }
        (TypeKind::Bytes, DecodedValue::Bytes(b)) => {
            out.extend_from_slice(&usize_word(b.len()));
            write_padded(b, out);
        }
        (TypeKind::String, DecodedValue::String(s)) => {
            out.extend_from_slice(&usize_word(s.len()));
            write_padded(s.as_bytes(), out);
        }
        (TypeKind::Array(elem), DecodedValue::Array(items)) => {
            out.extend_from_slice(&usize_word(items.len()));
            let items: Vec<_> = items.iter().map(|v| (elem.as_ref(), v)).collect();
            encode_region(&items, out)?;
        }
        (TypeKind::FixedArray(elem, len), DecodedValue::Array(items)) => {
            if items.len() != *len {
                return Err(mismatch(ty, value));
            }
            let items: Vec<_> = items.iter().map(|v| (elem.as_ref(), v)).collect();
            encode_region(&items, out)?;
        }
        (TypeKind::Tuple(fields), DecodedValue::Tuple(items)) => {
            if items.len() != fields.len() {
                return Err(mismatch(ty, value));
            }
            let items: Vec<_> = fields
                .iter()
                .map(|(_, t)| t)
                .zip(items.iter().map(|(_, v)| v))
                .collect();
            encode_region(&items, out)?;
        }
        _ => return Err(mismatch(ty, value)),
    }
    Ok(())
}

fn write_padded(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(bytes);
    let rem = bytes.len() % WORD;
    if rem != 0 {
        out.resize(out.len() + WORD - rem, 0);
    }
}

fn mismatch(ty: &AbiType, value: &DecodedValue) -> EncodeError {
    EncodeError::TypeMismatch {
        expected: ty.to_string(),
        got: value.type_name().to_string(),
    }
}

fn out_of_range(ty: &AbiType) -> EncodeError {
    EncodeError::ValueOutOfRange { ty: ty.to_string() }
}
