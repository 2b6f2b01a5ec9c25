//! Report assembly for flat and timelock proposals

use super::dispatch::Dispatcher;
use super::error::ReportError;
use crate::domain::{
    BatchReport, Family, OperationReport, Proposal, ProposalInput, ProposalReport,
    TimelockProposal, Transaction, UNKNOWN_CHAIN,
};

/// Builds [`ProposalReport`]s; stateless, every call is independent
pub struct ReportBuilder<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn build(&self, input: &ProposalInput) -> Result<ProposalReport, ReportError> {
        match input {
            ProposalInput::Simple(proposal) => self.build_proposal(proposal),
            ProposalInput::Timelock(proposal) => self.build_timelock(proposal),
        }
    }

    /// One operation report per proposal operation, in proposal order
    pub fn build_proposal(&self, proposal: &Proposal) -> Result<ProposalReport, ReportError> {
        let operations = proposal
            .operations
            .iter()
            .map(|op| {
                let (family, chain_name) = self.resolve_chain(op.chain_selector)?;
                self.operation_report(op.chain_selector, chain_name, family, &op.transaction)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ProposalReport::Operations(operations))
    }

    /// One batch report per batch, one operation report per transaction
    pub fn build_timelock(
        &self,
        proposal: &TimelockProposal,
    ) -> Result<ProposalReport, ReportError> {
        let mut batches = Vec::with_capacity(proposal.operations.len());
        for batch in &proposal.operations {
            let (family, chain_name) = self.resolve_chain(batch.chain_selector)?;
            let operations = batch
                .transactions
                .iter()
                .map(|tx| {
                    self.operation_report(batch.chain_selector, chain_name.clone(), family.clone(), tx)
                })
                .collect::<Result<Vec<_>, _>>()?;
            batches.push(BatchReport {
                chain_selector: batch.chain_selector,
                chain_name,
                family,
                operations,
            });
        }
        Ok(ProposalReport::Batches(batches))
    }

    fn operation_report(
        &self,
        chain_selector: u64,
        chain_name: String,
        family: Family,
        tx: &Transaction,
    ) -> Result<OperationReport, ReportError> {
        let calls = self
            .dispatcher
            .decode_for_family(&family, chain_selector, tx)?
            .into_iter()
            .collect();
        Ok(OperationReport {
            chain_selector,
            chain_name,
            family,
            calls,
        })
    }

    /// Family failures are fatal; a missing name only degrades
    fn resolve_chain(&self, chain_selector: u64) -> Result<(Family, String), ReportError> {
        let chains = self.dispatcher.chains();
        let family = chains
            .family(chain_selector)
            .map_err(|source| ReportError::UnknownFamily {
                selector: chain_selector,
                source,
            })?;
        let name = chains.name(chain_selector).unwrap_or_else(|err| {
            tracing::warn!(chain_selector, error = %err, "chain name unresolved");
            UNKNOWN_CHAIN.to_string()
        });
        Ok((family, name))
    }
}
