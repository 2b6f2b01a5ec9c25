//! Analyzers that always close the chain

use regex::Regex;

use super::{element_type, Analyzer, AnalyzerChain};
use crate::domain::{Descriptor, RawValue};

/// Byte arrays become `Bytes`, address-shaped values become `Address`
pub struct BytesAndAddressAnalyzer;

impl Analyzer for BytesAndAddressAnalyzer {
    fn analyze(
        &self,
        _name: &str,
        type_tag: &str,
        value: &RawValue,
        _chain: &AnalyzerChain,
    ) -> Option<Descriptor> {
        match value {
            RawValue::Bytes(bytes) | RawValue::FixedBytes(bytes) => {
                Some(Descriptor::Bytes(bytes.clone()))
            }
            RawValue::Address(address) => Some(Descriptor::Address(address.clone())),
            RawValue::Text(text) if is_address_type(type_tag) => {
                Some(Descriptor::Address(text.clone()))
            }
            RawValue::Array(items) if is_byte_array_type(type_tag) => {
                byte_array(items).map(Descriptor::Bytes)
            }
            _ => None,
        }
    }
}

fn is_address_type(type_tag: &str) -> bool {
    matches!(type_tag.trim(), "address" | "Pubkey" | "publicKey")
}

/// Move and Rust byte containers (`vector<u8>`, `[u8; 32]`); a Solidity
/// `uint8[]` stays an integer array
fn is_byte_array_type(type_tag: &str) -> bool {
    let tag = type_tag.trim();
    tag != "u8" && element_type(tag) == "u8"
}

/// Byte containers decoded element-wise
fn byte_array(items: &[RawValue]) -> Option<Vec<u8>> {
    items
        .iter()
        .map(|item| match item {
            RawValue::Number(n) => n.parse::<u8>().ok(),
            _ => None,
        })
        .collect()
}

/// `uint64` arguments named like a chain selector become `ChainSelector`
pub struct ChainSelectorAnalyzer {
    name_pattern: Regex,
}

impl Default for ChainSelectorAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainSelectorAnalyzer {
    pub fn new() -> Self {
        Self {
            // unanchored: any name containing "chain" qualifies
            name_pattern: Regex::new(r"(?i)chain").expect("chain selector pattern is valid"),
        }
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name_pattern.is_match(name)
    }
}

impl Analyzer for ChainSelectorAnalyzer {
    fn analyze(
        &self,
        name: &str,
        type_tag: &str,
        value: &RawValue,
        _chain: &AnalyzerChain,
    ) -> Option<Descriptor> {
        if !matches!(type_tag.trim(), "uint64" | "u64") || !self.matches_name(name) {
            return None;
        }
        match value {
            RawValue::Number(n) => n.parse::<u64>().ok().map(Descriptor::ChainSelector),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(analyzer: &dyn Analyzer, name: &str, tag: &str, value: RawValue) -> Option<Descriptor> {
        let chain = AnalyzerChain::default();
        analyzer.analyze(name, tag, &value, &chain)
    }

    #[test]
    fn test_bytes_and_addresses() {
        let a = BytesAndAddressAnalyzer;
        assert_eq!(
            analyze(&a, "data", "bytes", RawValue::Bytes(vec![1])),
            Some(Descriptor::Bytes(vec![1]))
        );
        assert_eq!(
            analyze(&a, "salt", "bytes32", RawValue::FixedBytes(vec![0; 32])),
            Some(Descriptor::Bytes(vec![0; 32]))
        );
        assert_eq!(
            analyze(&a, "owner", "address", RawValue::Text("0xabc".into())),
            Some(Descriptor::address("0xabc"))
        );
        assert_eq!(analyze(&a, "owner", "string", RawValue::Text("0xabc".into())), None);
    }

    #[test]
    fn test_numeric_byte_array() {
        let a = BytesAndAddressAnalyzer;
        let items = vec![RawValue::Number("1".into()), RawValue::Number("255".into())];
        assert_eq!(
            analyze(&a, "seed", "u8[2]", RawValue::Array(items)),
            Some(Descriptor::Bytes(vec![1, 255]))
        );
        let move_bytes = vec![RawValue::Number("7".into())];
        assert_eq!(
            analyze(&a, "payload", "vector<u8>", RawValue::Array(move_bytes.clone())),
            Some(Descriptor::Bytes(vec![7]))
        );
        assert_eq!(
            analyze(&a, "seed", "[u8; 1]", RawValue::Array(move_bytes)),
            Some(Descriptor::Bytes(vec![7]))
        );
        let out_of_range = vec![RawValue::Number("256".into())];
        assert_eq!(analyze(&a, "seed", "u8[]", RawValue::Array(out_of_range)), None);
    }

    #[test]
    fn test_uint8_array_stays_integer_array() {
        let items = vec![RawValue::Number("1".into()), RawValue::Number("2".into())];
        assert_eq!(
            analyze(&BytesAndAddressAnalyzer, "ops", "uint8[]", RawValue::Array(items.clone())),
            None
        );
        assert_eq!(
            AnalyzerChain::default().classify("ops", "uint8[]", &RawValue::Array(items)),
            Descriptor::Array(vec![Descriptor::simple("1"), Descriptor::simple("2")])
        );
    }

    #[test]
    fn test_chain_selector_name_pattern() {
        let a = ChainSelectorAnalyzer::new();
        assert!(a.matches_name("chainSelector"));
        assert!(a.matches_name("remoteChainSelector"));
        assert!(a.matches_name("DEST_CHAIN_SEL"));
        assert!(a.matches_name("chain"));
        assert!(!a.matches_name("amount"));
        // substring match, so these are classified too
        assert!(a.matches_name("blockchainId"));
        assert!(a.matches_name("offchainConfigVersion"));
    }

    #[test]
    fn test_chain_selector_requires_uint64() {
        let a = ChainSelectorAnalyzer::new();
        assert_eq!(
            analyze(&a, "chainSelector", "uint64", RawValue::Number("7".into())),
            Some(Descriptor::ChainSelector(7))
        );
        assert_eq!(
            analyze(&a, "chainSelector", "uint256", RawValue::Number("7".into())),
            None
        );
        assert_eq!(analyze(&a, "nonce", "uint64", RawValue::Number("7".into())), None);
    }
}
