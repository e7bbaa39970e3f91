//! 32-byte word helpers shared by the decoder and the encoder.

use logabi_core::{DecodeError, I256, U256, WORD};

pub(crate) type Word = [u8; WORD];

/// All ones in the low `bits` bits.
pub(crate) fn int_mask(bits: u16) -> U256 {
    U256::MAX >> (256 - usize::from(bits))
}

/// Interpret the low `bits` bits of `raw` as a two's-complement integer.
pub(crate) fn sign_extend(raw: U256, bits: u16) -> I256 {
    if bits == 256 {
        return I256::from_raw(raw);
    }
    let mask = int_mask(bits);
    let low = raw & mask;
    if low.bit(usize::from(bits) - 1) {
        I256::from_raw(low | !mask)
    } else {
        I256::from_raw(low)
    }
}

/// Read the word starting at `at`.
pub(crate) fn read_word(buf: &[u8], at: usize) -> Result<&Word, DecodeError> {
    at.checked_add(WORD)
        .and_then(|end| buf.get(at..end))
        .and_then(|slice| slice.try_into().ok())
        .ok_or(DecodeError::TruncatedInput {
            offset: at,
            needed: WORD,
            available: buf.len().saturating_sub(at),
        })
}

/// Ensure `needed` bytes are readable at `at` before allocating for them.
pub(crate) fn ensure_available(buf: &[u8], at: usize, needed: usize) -> Result<(), DecodeError> {
    match at.checked_add(needed) {
        Some(end) if end <= buf.len() => Ok(()),
        _ => Err(DecodeError::TruncatedInput {
            offset: at,
            needed,
            available: buf.len().saturating_sub(at),
        }),
    }
}

/// The word as a `usize`, or `None` if it does not fit.
pub(crate) fn word_to_usize(word: &Word) -> Option<usize> {
    let (high, low) = word.split_at(WORD - 8);
    if high.iter().any(|&b| b != 0) {
        return None;
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(low);
    usize::try_from(u64::from_be_bytes(bytes)).ok()
}

pub(crate) fn word_to_string(word: &Word) -> String {
    U256::from_be_bytes(*word).to_string()
}

pub(crate) fn usize_word(n: usize) -> Word {
    U256::from(n).to_be_bytes::<WORD>()
}
