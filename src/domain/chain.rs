//! Chain families and chain-selector resolution contracts

use std::fmt;

use thiserror::Error;

/// Placeholder shown wherever a chain name cannot be resolved
pub const UNKNOWN_CHAIN: &str = "<chain unknown>";

/// Execution-environment family of a chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    Evm,
    Solana,
    Aptos,
    Sui,
    Ton,
    Other(String),
}

/// What the dispatcher does when a family decoder rejects a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The whole report build fails
    Abort,
    /// The failure is folded into the method of that one decoded call
    Inline,
}

impl Family {
    /// Parse a family name as used in configuration files
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "evm" => Family::Evm,
            "solana" => Family::Solana,
            "aptos" => Family::Aptos,
            "sui" => Family::Sui,
            "ton" => Family::Ton,
            other => Family::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Family::Evm => "evm",
            Family::Solana => "solana",
            Family::Aptos => "aptos",
            Family::Sui => "sui",
            Family::Ton => "ton",
            Family::Other(name) => name,
        }
    }

    /// EVM and Solana decoders are authoritative; the Move-style and TON
    /// families review long append-only entry-point lists and degrade instead.
    pub fn failure_policy(&self) -> FailurePolicy {
        match self {
            Family::Evm | Family::Solana => FailurePolicy::Abort,
            Family::Aptos | Family::Sui | Family::Ton | Family::Other(_) => FailurePolicy::Inline,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chain resolution failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("unknown chain selector {0}")]
    UnknownSelector(u64),
    #[error("chain selector {selector} has no {what}")]
    Missing { selector: u64, what: &'static str },
}

/// Resolves chain selectors to families and human-readable names
pub trait ChainResolver: Send + Sync {
    /// Family of the chain identified by `selector`
    fn family(&self, selector: u64) -> Result<Family, ChainError>;

    /// Human-readable chain name
    fn name(&self, selector: u64) -> Result<String, ChainError>;

    /// Chain name, or [`UNKNOWN_CHAIN`] when it cannot be resolved
    fn name_or_unknown(&self, selector: u64) -> String {
        self.name(selector)
            .unwrap_or_else(|_| UNKNOWN_CHAIN.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_from_name() {
        assert_eq!(Family::from_name("EVM"), Family::Evm);
        assert_eq!(Family::from_name(" sui "), Family::Sui);
        assert_eq!(Family::from_name("tron"), Family::Other("tron".to_string()));
        assert_eq!(Family::Other("tron".to_string()).to_string(), "tron");
    }

    #[test]
    fn test_failure_policy() {
        assert_eq!(Family::Evm.failure_policy(), FailurePolicy::Abort);
        assert_eq!(Family::Solana.failure_policy(), FailurePolicy::Abort);
        assert_eq!(Family::Aptos.failure_policy(), FailurePolicy::Inline);
        assert_eq!(Family::Ton.failure_policy(), FailurePolicy::Inline);
    }
}
