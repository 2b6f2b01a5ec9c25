//! Structured values that need pretty-printing beyond a flat scalar

use base64::Engine;
use serde::{Deserialize, Serialize};

/// A closed set of pretty-printable shapes carried by `Descriptor::Yaml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YamlValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Text(String),
    /// Byte blob, including fixed-size byte arrays
    Bytes(Vec<u8>),
    Seq(Vec<YamlValue>),
    /// Ordered key/value pairs; declaration order is preserved
    Map(Vec<(String, YamlValue)>),
}

impl YamlValue {
    /// Convenience constructor for maps built from string keys
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, YamlValue)>) -> Self {
        YamlValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// How byte blobs are printed inside structured values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BytesFormat {
    /// `0x`-prefixed lowercase hex
    #[default]
    Hex,
    /// Standard base64 with padding
    Base64,
}

/// Per-shape formatting rules used when marshaling [`YamlValue`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarshalRules {
    #[serde(default)]
    pub bytes: BytesFormat,
}

impl MarshalRules {
    pub fn format_bytes(&self, bytes: &[u8]) -> String {
        match self.bytes {
            BytesFormat::Hex => format!("0x{}", hex::encode(bytes)),
            BytesFormat::Base64 => base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Convert into a `serde_yaml` tree, applying the byte rule
    pub fn to_yaml(&self, value: &YamlValue) -> serde_yaml::Value {
        match value {
            YamlValue::Null => serde_yaml::Value::Null,
            YamlValue::Bool(b) => serde_yaml::Value::Bool(*b),
            YamlValue::Int(i) => serde_yaml::Value::Number((*i).into()),
            YamlValue::UInt(u) => serde_yaml::Value::Number((*u).into()),
            YamlValue::Text(s) => serde_yaml::Value::String(s.clone()),
            YamlValue::Bytes(bytes) => serde_yaml::Value::String(self.format_bytes(bytes)),
            YamlValue::Seq(items) => {
                serde_yaml::Value::Sequence(items.iter().map(|item| self.to_yaml(item)).collect())
            }
            YamlValue::Map(entries) => {
                let mut mapping = serde_yaml::Mapping::new();
                for (key, item) in entries {
                    mapping.insert(serde_yaml::Value::String(key.clone()), self.to_yaml(item));
                }
                serde_yaml::Value::Mapping(mapping)
            }
        }
    }

    /// Pretty-print a structured value
    pub fn marshal(&self, value: &YamlValue) -> Result<String, serde_yaml::Error> {
        let rendered = serde_yaml::to_string(&self.to_yaml(value))?;
        Ok(rendered.trim_end().to_string())
    }
}
