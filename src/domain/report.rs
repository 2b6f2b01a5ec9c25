//! Decoded calls and proposal reports

use super::chain::Family;
use super::descriptor::NamedDescriptor;

/// One fully decoded invocation
///
/// `method` may carry a decode failure message instead of a method
/// signature; the call still renders so the reviewer sees one entry per
/// submitted transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedCall {
    pub address: String,
    pub method: String,
    pub inputs: Vec<NamedDescriptor>,
    pub outputs: Vec<NamedDescriptor>,
    pub contract_type: Option<String>,
    pub contract_version: Option<String>,
}

impl DecodedCall {
    pub fn new(address: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            method: method.into(),
            ..Self::default()
        }
    }

    /// Entry standing in for a transaction whose decoder rejected it
    pub fn failed(address: impl Into<String>, family: &Family, cause: &anyhow::Error) -> Self {
        Self::new(
            address,
            format!("failed to decode {} transaction: {:#}", family, cause),
        )
    }

    /// Entry standing in for a transaction of a family nothing can decode
    pub fn unsupported(address: impl Into<String>, family: &Family) -> Self {
        Self::new(
            address,
            format!("decoding is not supported for chain family '{}'", family),
        )
    }

    pub fn with_inputs(mut self, inputs: Vec<NamedDescriptor>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<NamedDescriptor>) -> Self {
        self.outputs = outputs;
        self
    }
}

/// Calls decoded for one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReport {
    pub chain_selector: u64,
    pub chain_name: String,
    pub family: Family,
    pub calls: Vec<DecodedCall>,
}

/// Operations of one timelock batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub chain_selector: u64,
    pub chain_name: String,
    pub family: Family,
    pub operations: Vec<OperationReport>,
}

/// Report for a whole proposal; exactly one shape per proposal kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalReport {
    Operations(Vec<OperationReport>),
    Batches(Vec<BatchReport>),
}

impl ProposalReport {
    /// Total number of decoded calls in the report
    pub fn call_count(&self) -> usize {
        match self {
            ProposalReport::Operations(ops) => ops.iter().map(|op| op.calls.len()).sum(),
            ProposalReport::Batches(batches) => batches
                .iter()
                .flat_map(|batch| batch.operations.iter())
                .map(|op| op.calls.len())
                .sum(),
        }
    }
}
