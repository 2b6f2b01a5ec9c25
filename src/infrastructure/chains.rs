//! Static chain-selector table

use std::collections::BTreeMap;

use crate::domain::{ChainError, ChainResolver, Family};

/// Well-known mainnet and testnet selectors
const DEFAULT_CHAINS: &[(u64, &str, Family)] = &[
    (5009297550715157269, "ethereum-mainnet", Family::Evm),
    (16015286601757825753, "ethereum-testnet-sepolia", Family::Evm),
    (124615329519749607, "solana-mainnet", Family::Solana),
    (4741433654826277614, "aptos-mainnet", Family::Aptos),
    (17529533435026248318, "sui-mainnet", Family::Sui),
    (16448340667252469081, "ton-mainnet", Family::Ton),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct ChainInfo {
    name: String,
    family: Family,
}

/// In-memory [`ChainResolver`] built from known selectors and configuration
#[derive(Debug, Clone, Default)]
pub struct ChainTable {
    chains: BTreeMap<u64, ChainInfo>,
}

impl ChainTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table pre-populated with well-known chains
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for (selector, name, family) in DEFAULT_CHAINS {
            table.insert(*selector, *name, family.clone());
        }
        table
    }

    /// Register or replace a chain
    pub fn insert(&mut self, selector: u64, name: impl Into<String>, family: Family) {
        self.chains.insert(
            selector,
            ChainInfo {
                name: name.into(),
                family,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl ChainResolver for ChainTable {
    fn family(&self, selector: u64) -> Result<Family, ChainError> {
        self.chains
            .get(&selector)
            .map(|info| info.family.clone())
            .ok_or(ChainError::UnknownSelector(selector))
    }

    fn name(&self, selector: u64) -> Result<String, ChainError> {
        let info = self
            .chains
            .get(&selector)
            .ok_or(ChainError::UnknownSelector(selector))?;
        if info.name.trim().is_empty() {
            return Err(ChainError::Missing {
                selector,
                what: "name",
            });
        }
        Ok(info.name.clone())
    }
}
