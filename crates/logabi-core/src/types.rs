//! Runtime ABI type descriptors.
//!
//! An [`AbiType`] is a closed recursive sum type over the Solidity ABI type
//! grammar. Descriptors are built once per catalog load, from a type string
//! (`"(uint256,address)[3]"`) or from a JSON ABI parameter with
//! `components`, and then shared read-only by every decode call.
//!
//! Whether a type is dynamic and how many head bytes it occupies are
//! computed once at construction time and stored alongside the kind.

use crate::error::TypeError;
use crate::WORD;
use std::fmt;

/// The shape of an ABI type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Unsigned integer, width in bits (8..=256, step 8)
    Uint(u16),
    /// Signed integer, width in bits (8..=256, step 8)
    Int(u16),
    Bool,
    /// 20-byte account address
    Address,
    /// `bytes1` .. `bytes32`, length in bytes
    FixedBytes(u8),
    /// Variable-length byte array
    Bytes,
    /// UTF-8 string
    String,
    /// `T[N]`
    FixedArray(Box<AbiType>, usize),
    /// `T[]`
    Array(Box<AbiType>),
    /// Ordered, named fields
    Tuple(Vec<(String, AbiType)>),
}

/// A parsed ABI type with its memoized layout facts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbiType {
    kind: TypeKind,
    dynamic: bool,
    head_size: usize,
}

impl AbiType {
    pub fn uint(bits: u16) -> Result<Self, TypeError> {
        check_int_bits("uint", bits)?;
        Ok(Self::scalar(TypeKind::Uint(bits)))
    }

    pub fn int(bits: u16) -> Result<Self, TypeError> {
        check_int_bits("int", bits)?;
        Ok(Self::scalar(TypeKind::Int(bits)))
    }

    pub fn bool() -> Self {
        Self::scalar(TypeKind::Bool)
    }

    pub fn address() -> Self {
        Self::scalar(TypeKind::Address)
    }

    pub fn fixed_bytes(n: u8) -> Result<Self, TypeError> {
        if !(1..=32).contains(&n) {
            return Err(TypeError::invalid(
                format!("bytes{n}"),
                "fixed bytes size must be in [1, 32]",
            ));
        }
        Ok(Self::scalar(TypeKind::FixedBytes(n)))
    }

    pub fn bytes() -> Self {
        Self::dynamic(TypeKind::Bytes)
    }

    pub fn string() -> Self {
        Self::dynamic(TypeKind::String)
    }

    pub fn array(elem: AbiType) -> Self {
        Self::dynamic(TypeKind::Array(Box::new(elem)))
    }

    pub fn fixed_array(elem: AbiType, len: usize) -> Result<Self, TypeError> {
        if elem.dynamic {
            return Ok(Self::dynamic(TypeKind::FixedArray(Box::new(elem), len)));
        }
        let head_size = elem.head_size.checked_mul(len).ok_or_else(|| {
            TypeError::invalid(format!("{elem}[{len}]"), "static size overflows usize")
        })?;
        Ok(Self {
            kind: TypeKind::FixedArray(Box::new(elem), len),
            dynamic: false,
            head_size,
        })
    }

    /// Build a tuple. Empty field names are replaced by their position;
    /// remaining names must be unique.
    pub fn tuple(fields: Vec<(String, AbiType)>) -> Result<Self, TypeError> {
        let fields: Vec<(String, AbiType)> = fields
            .into_iter()
            .enumerate()
            .map(|(i, (name, ty))| {
                if name.is_empty() {
                    (i.to_string(), ty)
                } else {
                    (name, ty)
                }
            })
            .collect();

        for (i, (name, _)) in fields.iter().enumerate() {
            if fields[..i].iter().any(|(other, _)| other == name) {
                return Err(TypeError::invalid(
                    tuple_signature(&fields),
                    format!("duplicate tuple field name '{name}'"),
                ));
            }
        }

        let dynamic = fields.iter().any(|(_, t)| t.dynamic);
        let head_size = if dynamic {
            WORD
        } else {
            fields
                .iter()
                .try_fold(0usize, |acc, (_, t)| acc.checked_add(t.head_size))
                .ok_or_else(|| {
                    TypeError::invalid(tuple_signature(&fields), "static size overflows usize")
                })?
        };

        Ok(Self {
            kind: TypeKind::Tuple(fields),
            dynamic,
            head_size,
        })
    }

    fn scalar(kind: TypeKind) -> Self {
        Self {
            kind,
            dynamic: false,
            head_size: WORD,
        }
    }

    fn dynamic(kind: TypeKind) -> Self {
        Self {
            kind,
            dynamic: true,
            head_size: WORD,
        }
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// `true` if the encoding is referenced through an offset in the head.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Number of bytes this type occupies in the head region: 32 for
    /// dynamic types, the full static width otherwise.
    pub fn head_size(&self) -> usize {
        self.head_size
    }

    /// Parse a type string such as `uint256`, `address[]` or
    /// `(uint256,(bool,string))[2]`.
    pub fn parse(ty: &str) -> Result<Self, TypeError> {
        Self::from_components(ty, None)
    }

    /// Parse a JSON ABI parameter type. `components` supplies the fields of
    /// a `tuple` base (which may carry array suffixes, e.g. `tuple[2][]`).
    pub fn from_components(
        ty: &str,
        components: Option<Vec<(String, AbiType)>>,
    ) -> Result<Self, TypeError> {
        let (base, dims) = split_array_suffixes(ty)?;

        let mut parsed = match components {
            Some(fields) if base == "tuple" || base.is_empty() => Self::tuple(fields)?,
            Some(_) => {
                return Err(TypeError::invalid(
                    ty,
                    "components are only allowed on tuple types",
                ))
            }
            None => parse_base(ty, base)?,
        };

        for dim in dims {
            parsed = match dim {
                Some(len) => Self::fixed_array(parsed, len)?,
                None => Self::array(parsed),
            };
        }
        Ok(parsed)
    }
}

fn check_int_bits(prefix: &str, bits: u16) -> Result<(), TypeError> {
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(TypeError::invalid(
            format!("{prefix}{bits}"),
            "integer width must be a multiple of 8 in [8, 256]",
        ));
    }
    Ok(())
}

/// Split `T[2][]` into (`T`, [Some(2), None]); dimensions apply left to right.
fn split_array_suffixes(ty: &str) -> Result<(&str, Vec<Option<usize>>), TypeError> {
    let mut base = ty;
    let mut dims = Vec::new();
    while let Some(rest) = base.strip_suffix(']') {
        let open = rest
            .rfind('[')
            .ok_or_else(|| TypeError::invalid(ty, "unbalanced array brackets"))?;
        let size = &rest[open + 1..];
        let dim = if size.is_empty() {
            None
        } else {
            Some(parse_decimal(size).ok_or_else(|| {
                TypeError::invalid(ty, format!("array size '{size}' is not a non-negative integer"))
            })?)
        };
        dims.push(dim);
        base = &rest[..open];
    }
    dims.reverse();
    Ok((base, dims))
}

fn parse_base(full: &str, base: &str) -> Result<AbiType, TypeError> {
    if let Some(inner) = base.strip_prefix('(') {
        let inner = inner
            .strip_suffix(')')
            .ok_or_else(|| TypeError::invalid(full, "unbalanced parentheses"))?;
        let fields = split_top_level(inner)
            .ok_or_else(|| TypeError::invalid(full, "unbalanced parentheses"))?
            .into_iter()
            .map(|part| Ok((String::new(), AbiType::parse(part)?)))
            .collect::<Result<Vec<_>, TypeError>>()?;
        return AbiType::tuple(fields);
    }

    match base {
        "bool" => return Ok(AbiType::bool()),
        "address" => return Ok(AbiType::address()),
        "string" => return Ok(AbiType::string()),
        "bytes" => return Ok(AbiType::bytes()),
        "uint" => return AbiType::uint(256),
        "int" => return AbiType::int(256),
        "tuple" => return Err(TypeError::invalid(full, "tuple type without components")),
        "" => return Err(TypeError::invalid(full, "missing base type")),
        _ => {}
    }

    if let Some(bits) = base.strip_prefix("uint") {
        return AbiType::uint(parse_width(full, bits)?);
    }
    if let Some(bits) = base.strip_prefix("int") {
        return AbiType::int(parse_width(full, bits)?);
    }
    if let Some(n) = base.strip_prefix("bytes") {
        let n = parse_width(full, n)?;
        let n = u8::try_from(n)
            .map_err(|_| TypeError::invalid(full, "fixed bytes size must be in [1, 32]"))?;
        return AbiType::fixed_bytes(n);
    }

    Err(TypeError::invalid(full, format!("unknown base type '{base}'")))
}

fn parse_width(full: &str, digits: &str) -> Result<u16, TypeError> {
    parse_decimal(digits)
        .and_then(|n| u16::try_from(n).ok())
        .ok_or_else(|| TypeError::invalid(full, format!("invalid width '{digits}'")))
}

/// Canonical non-negative decimal: digits only, no leading zeros (except "0").
fn parse_decimal(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

/// Split on commas that are not nested inside parentheses.
/// Returns `None` on unbalanced input.
fn split_top_level(s: &str) -> Option<Vec<&str>> {
    if s.is_empty() {
        return Some(Vec::new());
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&s[start..]);
    Some(parts)
}

fn tuple_signature(fields: &[(String, AbiType)]) -> String {
    let inner: Vec<String> = fields.iter().map(|(_, t)| t.to_string()).collect();
    format!("({})", inner.join(","))
}

/// Renders the canonical form used in event signatures.
impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Uint(bits) => write!(f, "uint{bits}"),
            TypeKind::Int(bits) => write!(f, "int{bits}"),
            TypeKind::Bool => write!(f, "bool"),
            TypeKind::Address => write!(f, "address"),
            TypeKind::FixedBytes(n) => write!(f, "bytes{n}"),
            TypeKind::Bytes => write!(f, "bytes"),
            TypeKind::String => write!(f, "string"),
            TypeKind::FixedArray(elem, len) => write!(f, "{elem}[{len}]"),
            TypeKind::Array(elem) => write!(f, "{elem}[]"),
            TypeKind::Tuple(fields) => write!(f, "{}", tuple_signature(fields)),
        }
    }
}

impl std::str::FromStr for AbiType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
