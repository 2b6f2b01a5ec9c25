//! Annotation context and address-book snapshot

use std::any::{type_name, Any};
use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

/// Key under which the address-by-chain [`AddressBook`] is stored
pub const ADDRESSES_BY_CHAIN: &str = "addresses_by_chain";

/// Context lookup failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("context key '{0}' not found")]
    NotFound(String),
    #[error("context key '{key}' holds {actual}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },
}

struct Entry {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

/// Open key/value bag handed to renderers
///
/// Values are type-checked on lookup, so the descriptor model never needs to
/// know about concrete registry types.
#[derive(Default)]
pub struct AnnotationContext {
    entries: HashMap<String, Entry>,
}

impl AnnotationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying only an address book
    pub fn with_address_book(book: AddressBook) -> Self {
        let mut ctx = Self::new();
        ctx.insert(ADDRESSES_BY_CHAIN, book);
        ctx
    }

    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.entries.insert(
            key.into(),
            Entry {
                value: Box::new(value),
                type_name: type_name::<T>(),
            },
        );
    }

    /// Look up `key`, requiring it to hold a `T`
    pub fn get<T: Any>(&self, key: &str) -> Result<&T, ContextError> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| ContextError::NotFound(key.to_string()))?;
        entry
            .value
            .downcast_ref::<T>()
            .ok_or_else(|| ContextError::TypeMismatch {
                key: key.to_string(),
                expected: type_name::<T>(),
                actual: entry.type_name,
            })
    }
}

impl std::fmt::Debug for AnnotationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<(&String, &str)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key, entry.type_name))
            .collect();
        keys.sort();
        f.debug_struct("AnnotationContext").field("entries", &keys).finish()
    }
}

/// Contract type and version registered for an address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAndVersion {
    pub contract_type: String,
    pub version: String,
}

impl TypeAndVersion {
    pub fn new(contract_type: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            contract_type: contract_type.into(),
            version: version.into(),
        }
    }
}

/// Read-only snapshot of deployed contracts, keyed by chain selector
///
/// Iteration is ordered by chain selector, then address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    chains: BTreeMap<u64, BTreeMap<String, TypeAndVersion>>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chain_selector: u64, address: impl Into<String>, tv: TypeAndVersion) {
        self.chains
            .entry(chain_selector)
            .or_default()
            .insert(address.into(), tv);
    }

    /// Exact-match lookup on one chain
    pub fn lookup(&self, chain_selector: u64, address: &str) -> Option<&TypeAndVersion> {
        self.chains.get(&chain_selector)?.get(address)
    }

    /// First chain (by ascending selector) on which `address` is registered
    pub fn find(&self, address: &str) -> Option<(u64, &TypeAndVersion)> {
        self.chains
            .iter()
            .find_map(|(selector, addresses)| addresses.get(address).map(|tv| (*selector, tv)))
    }

    pub fn len(&self) -> usize {
        self.chains.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
