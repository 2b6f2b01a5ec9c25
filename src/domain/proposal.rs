//! Proposal documents as submitted for review

use alloy_primitives::Bytes;
use serde::{Deserialize, Serialize};

/// One transaction targeted at a contract or account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Target address in the chain's native textual form
    pub to: String,
    /// Raw call data
    #[serde(default)]
    pub data: Bytes,
    #[serde(default)]
    pub contract_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Family-specific auxiliary fields (native value, module/function
    /// names, account metadata, ...)
    #[serde(default)]
    pub additional_fields: serde_json::Value,
}

impl Transaction {
    pub fn new(to: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            to: to.into(),
            data: data.into(),
            ..Self::default()
        }
    }

    pub fn with_additional_fields(mut self, fields: serde_json::Value) -> Self {
        self.additional_fields = fields;
        self
    }
}

/// A single-chain operation of a flat proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub chain_selector: u64,
    pub transaction: Transaction,
}

/// A flat proposal: one transaction per operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub operations: Vec<Operation>,
}

/// A batch of transactions executed together on one chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOperation {
    pub chain_selector: u64,
    pub transactions: Vec<Transaction>,
}

/// A timelock proposal: operations are grouped into batches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelockProposal {
    pub operations: Vec<BatchOperation>,
}

/// Either kind of proposal
#[derive(Debug, Clone, PartialEq)]
pub enum ProposalInput {
    Simple(Proposal),
    Timelock(TimelockProposal),
}
