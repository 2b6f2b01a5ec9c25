//! Per-family decoder contract and the raw, unclassified values it yields

use std::fmt;

use super::proposal::Transaction;
use super::yaml::YamlValue;

/// A decoded argument value before classification into a `Descriptor`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Bool(bool),
    /// Integer in decimal text, any width
    Number(String),
    Text(String),
    /// Variable-length byte array
    Bytes(Vec<u8>),
    /// Fixed-size byte array (`bytes32`, `[u8; 32]`, ...)
    FixedBytes(Vec<u8>),
    /// Address in its native textual form
    Address(String),
    Array(Vec<RawValue>),
    /// Struct-shaped value with named, typed fields in declaration order
    Struct(Vec<RawArg>),
    /// Nested structure that only makes sense pretty-printed
    Structured(YamlValue),
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Bool(b) => write!(f, "{}", b),
            RawValue::Number(n) => f.write_str(n),
            RawValue::Text(s) | RawValue::Address(s) => f.write_str(s),
            RawValue::Bytes(bytes) | RawValue::FixedBytes(bytes) => {
                write!(f, "0x{}", hex::encode(bytes))
            }
            RawValue::Array(items) => {
                let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
            RawValue::Struct(fields) => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|field| format!("{}: {}", field.name, field.value))
                    .collect();
                write!(f, "{{{}}}", fields.join(", "))
            }
            RawValue::Structured(value) => write!(f, "{:?}", value),
        }
    }
}

/// A decoded argument or struct field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArg {
    /// Parameter name (or "arg{n}" if unnamed)
    pub name: String,
    /// Source type tag (e.g. "uint64", "address", "(uint256,bytes)[]")
    pub type_tag: String,
    pub value: RawValue,
}

impl RawArg {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>, value: RawValue) -> Self {
        Self {
            name: name.into(),
            type_tag: type_tag.into(),
            value,
        }
    }
}

/// Decoder output for one transaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCall {
    /// Method name or signature (e.g. "transfer(address,uint256)")
    pub method: String,
    pub inputs: Vec<RawArg>,
    pub outputs: Vec<RawArg>,
    pub contract_type: Option<String>,
    pub contract_version: Option<String>,
}

/// Trait for per-family call decoders
///
/// One implementation per execution-environment family, each consuming that
/// family's own call-data or IDL format.
pub trait CallDecoder: Send + Sync {
    /// Decode one transaction
    ///
    /// # Returns
    /// * `Ok(Some(RawCall))` - The decoded call
    /// * `Ok(None)` - The transaction carries no call to decode
    /// * `Err(...)` - If decoding fails
    fn decode(&self, tx: &Transaction) -> anyhow::Result<Option<RawCall>>;
}

impl<F> CallDecoder for F
where
    F: Fn(&Transaction) -> anyhow::Result<Option<RawCall>> + Send + Sync,
{
    fn decode(&self, tx: &Transaction) -> anyhow::Result<Option<RawCall>> {
        self(tx)
    }
}
