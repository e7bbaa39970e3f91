//! Head/tail ABI decoding driven by a runtime [`AbiType`].
//!
//! A "region" is a sequence of values laid out heads-first: static values
//! inline, dynamic values as a 32-byte offset pointing into the region's
//! tail. Offsets are relative to the start of the enclosing region, which
//! is the start of `data` for top-level parameters, the element area (just
//! after the count word) for a dynamic array, and the tuple/array's own
//! start for nested tuples and fixed arrays.
//!
//! Every read is bounds-checked. Declared lengths are validated against the
//! remaining buffer before anything is allocated, so a hostile length word
//! cannot trigger a huge allocation.
//!
//! Heads may legally point at the same tail, so bounds checks alone do not
//! limit work. Each call carries a budget of `BUDGET_FACTOR × len` bytes and
//! every decoded word, payload byte and zero-width array element is charged
//! against it. A canonical encoding charges at most `len`; running out fails
//! with [`DecodeError::InvalidOffset`] at the position being decoded.

use logabi_core::{AbiType, Address, DecodeError, DecodedValue, TypeKind, U256, WORD};

use super::word::{
    ensure_available, int_mask, read_word, sign_extend, word_to_string, word_to_usize, Word,
};

const BUDGET_FACTOR: usize = 2;

/// Decode one value whose head starts at `offset`, treating `offset` as the
/// start of its enclosing region.
///
/// Returns the value and the number of head bytes consumed (the type's
/// head size: 32 for anything dynamic).
pub fn decode(
    ty: &AbiType,
    buf: &[u8],
    offset: usize,
) -> Result<(DecodedValue, usize), DecodeError> {
    let value = Reader::new(buf).decode_at(ty, offset, offset)?;
    Ok((value, ty.head_size()))
}

/// Decode an ordered parameter list laid out as one region at the start of
/// `data`.
///
/// Trailing bytes past what the types need are ignored.
pub fn decode_params<'t>(
    types: impl IntoIterator<Item = &'t AbiType>,
    data: &[u8],
) -> Result<Vec<DecodedValue>, DecodeError> {
    let types: Vec<&AbiType> = types.into_iter().collect();
    Reader::new(data).decode_region(&types, 0)
}

/// Decode a scalar from a single word (a topic or an inline head).
///
/// Returns `None` for types that are not a single word on their own.
pub fn decode_scalar(ty: &AbiType, word: &Word) -> Option<DecodedValue> {
    let value = match ty.kind() {
        TypeKind::Uint(bits) => uint_from(*bits, word),
        TypeKind::Int(bits) => int_from(*bits, word),
        TypeKind::Bool => bool_from(word),
        TypeKind::Address => address_from(word),
        TypeKind::FixedBytes(n) => fixed_bytes_from(*n, word),
        _ => return None,
    };
    Some(value)
}

fn uint_from(bits: u16, word: &Word) -> DecodedValue {
    DecodedValue::Uint(U256::from_be_bytes(*word) & int_mask(bits))
}

fn int_from(bits: u16, word: &Word) -> DecodedValue {
    DecodedValue::Int(sign_extend(U256::from_be_bytes(*word), bits))
}

fn bool_from(word: &Word) -> DecodedValue {
    DecodedValue::Bool(word.iter().any(|&b| b != 0))
}

fn address_from(word: &Word) -> DecodedValue {
    DecodedValue::Address(Address::from_slice(&word[WORD - 20..]))
}

fn fixed_bytes_from(n: u8, word: &Word) -> DecodedValue {
    DecodedValue::FixedBytes(word[..usize::from(n)].to_vec())
}

/// One decode call's input plus its remaining work budget.
struct Reader<'a> {
    buf: &'a [u8],
    budget: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            budget: buf.len().saturating_mul(BUDGET_FACTOR),
        }
    }

    fn charge(&mut self, cost: usize, at: usize) -> Result<(), DecodeError> {
        match self.budget.checked_sub(cost) {
            Some(rest) => {
                self.budget = rest;
                Ok(())
            }
            None => Err(DecodeError::InvalidOffset {
                offset: at.to_string(),
                len: self.buf.len(),
            }),
        }
    }

    /// Read and charge the scalar word at `at`.
    fn leaf(&mut self, at: usize) -> Result<&'a Word, DecodeError> {
        let word = read_word(self.buf, at)?;
        self.charge(WORD, at)?;
        Ok(word)
    }

    /// Read and charge a length-prefixed `bytes`/`string` payload.
    fn payload(&mut self, at: usize) -> Result<&'a [u8], DecodeError> {
        let payload = read_payload(self.buf, at)?;
        self.charge(WORD.saturating_add(payload.len()), at)?;
        Ok(payload)
    }

    fn decode_region(
        &mut self,
        types: &[&AbiType],
        base: usize,
    ) -> Result<Vec<DecodedValue>, DecodeError> {
        let mut values = Vec::with_capacity(types.len());
        let mut head = base;
        for ty in types {
            values.push(self.decode_at(ty, base, head)?);
            head = head
                .checked_add(ty.head_size())
                .ok_or_else(|| DecodeError::LengthOverflow {
                    length: ty.head_size().to_string(),
                })?;
        }
        Ok(values)
    }

    /// Decode the value whose head is at `head`, inside the region starting
    /// at `base`.
    fn decode_at(
        &mut self,
        ty: &AbiType,
        base: usize,
        head: usize,
    ) -> Result<DecodedValue, DecodeError> {
        let at = if ty.is_dynamic() {
            let target = follow_offset(self.buf, base, head)?;
            self.charge(WORD, head)?;
            target
        } else {
            head
        };

        match ty.kind() {
            TypeKind::Uint(bits) => self.leaf(at).map(|w| uint_from(*bits, w)),
            TypeKind::Int(bits) => self.leaf(at).map(|w| int_from(*bits, w)),
            TypeKind::Bool => self.leaf(at).map(bool_from),
            TypeKind::Address => self.leaf(at).map(address_from),
            TypeKind::FixedBytes(n) => self.leaf(at).map(|w| fixed_bytes_from(*n, w)),
            TypeKind::Bytes => Ok(DecodedValue::Bytes(self.payload(at)?.to_vec())),
            TypeKind::String => {
                let payload = self.payload(at)?;
                let s = std::str::from_utf8(payload)
                    .map_err(|_| DecodeError::InvalidUtf8 { offset: at + WORD })?;
                Ok(DecodedValue::String(s.to_owned()))
            }
            TypeKind::Array(elem) => {
                let count_word = read_word(self.buf, at)?;
                let count = to_len(count_word)?;
                let start = at + WORD;
                // Zero-head elements cannot be bounded by size; count each as one byte.
                let zero_width = elem.head_size() == 0;
                let stride = elem.head_size().max(1);
                let needed = count
                    .checked_mul(stride)
                    .ok_or_else(|| DecodeError::LengthOverflow {
                        length: word_to_string(count_word),
                    })?;
                if needed > self.buf.len() - start {
                    return Err(DecodeError::InvalidOffset {
                        offset: word_to_string(count_word),
                        len: self.buf.len(),
                    });
                }
                let cost = if zero_width { WORD.saturating_add(count) } else { WORD };
                self.charge(cost, at)?;
                let elems = vec![elem.as_ref(); count];
                Ok(DecodedValue::Array(self.decode_region(&elems, start)?))
            }
            TypeKind::FixedArray(elem, len) => {
                ensure_available(self.buf, at, member_heads(ty))?;
                let elems = vec![elem.as_ref(); *len];
                Ok(DecodedValue::Array(self.decode_region(&elems, at)?))
            }
            TypeKind::Tuple(fields) => {
                ensure_available(self.buf, at, member_heads(ty))?;
                let types: Vec<&AbiType> = fields.iter().map(|(_, t)| t).collect();
                let values = self.decode_region(&types, at)?;
                Ok(DecodedValue::Tuple(
                    fields
                        .iter()
                        .map(|(name, _)| name.clone())
                        .zip(values)
                        .collect(),
                ))
            }
        }
    }
}

/// Bytes occupied by the heads of a composite's members.
fn member_heads(ty: &AbiType) -> usize {
    match ty.kind() {
        TypeKind::FixedArray(elem, len) => elem.head_size().saturating_mul(*len),
        TypeKind::Tuple(fields) => fields
            .iter()
            .fold(0usize, |acc, (_, t)| acc.saturating_add(t.head_size())),
        _ => ty.head_size(),
    }
}

/// Read the offset word at `head` and resolve it against `base`.
///
/// The target may equal the buffer length: a dynamic value can still be
/// empty there (e.g. a zero-length fixed array of strings).
fn follow_offset(buf: &[u8], base: usize, head: usize) -> Result<usize, DecodeError> {
    let word = read_word(buf, head)?;
    let invalid = || DecodeError::InvalidOffset {
        offset: word_to_string(word),
        len: buf.len(),
    };
    let rel = word_to_usize(word).ok_or_else(invalid)?;
    let target = base.checked_add(rel).ok_or_else(invalid)?;
    if target > buf.len() {
        return Err(invalid());
    }
    Ok(target)
}

/// Read a length-prefixed `bytes`/`string` payload starting at `at`.
fn read_payload(buf: &[u8], at: usize) -> Result<&[u8], DecodeError> {
    let len_word = read_word(buf, at)?;
    let len = to_len(len_word)?;
    let start = at + WORD;
    let end = start
        .checked_add(len)
        .ok_or_else(|| DecodeError::LengthOverflow {
            length: word_to_string(len_word),
        })?;
    if end > buf.len() {
        return Err(DecodeError::InvalidOffset {
            offset: word_to_string(len_word),
            len: buf.len(),
        });
    }
    Ok(&buf[start..end])
}

fn to_len(word: &Word) -> Result<usize, DecodeError> {
    word_to_usize(word).ok_or_else(|| DecodeError::LengthOverflow {
        length: word_to_string(word),
    })
}
