//! Per-family decode dispatch
//!
//! Routes each transaction to the decoder registered for its chain family
//! and applies that family's failure policy.

use std::collections::HashMap;
use std::sync::Arc;

use super::error::ReportError;
use super::native;
use crate::analyzer::AnalyzerChain;
use crate::domain::{
    CallDecoder, ChainResolver, DecodedCall, FailurePolicy, Family, RawCall, Transaction,
};

/// Decodes transactions into [`DecodedCall`]s
pub struct Dispatcher {
    chains: Arc<dyn ChainResolver>,
    analyzers: AnalyzerChain,
    decoders: HashMap<Family, Box<dyn CallDecoder>>,
}

impl Dispatcher {
    /// Create a dispatcher with the built-in analyzers and no decoders
    pub fn new(chains: Arc<dyn ChainResolver>) -> Self {
        Self {
            chains,
            analyzers: AnalyzerChain::default(),
            decoders: HashMap::new(),
        }
    }

    /// Replace the analyzer chain
    pub fn with_analyzers(mut self, analyzers: AnalyzerChain) -> Self {
        self.analyzers = analyzers;
        self
    }

    /// Register the decoder for a family, replacing any previous one
    pub fn with_decoder(mut self, family: Family, decoder: impl CallDecoder + 'static) -> Self {
        self.decoders.insert(family, Box::new(decoder));
        self
    }

    pub fn chains(&self) -> &dyn ChainResolver {
        self.chains.as_ref()
    }

    /// Resolve the family of `chain_selector`, then decode `tx`
    pub fn decode(
        &self,
        chain_selector: u64,
        tx: &Transaction,
    ) -> Result<Option<DecodedCall>, ReportError> {
        let family = self
            .chains
            .family(chain_selector)
            .map_err(|source| ReportError::UnknownFamily {
                selector: chain_selector,
                source,
            })?;
        self.decode_for_family(&family, chain_selector, tx)
    }

    /// Decode `tx` for an already resolved family
    ///
    /// Yields `None` only when the decoder reports there is no call at all.
    pub fn decode_for_family(
        &self,
        family: &Family,
        chain_selector: u64,
        tx: &Transaction,
    ) -> Result<Option<DecodedCall>, ReportError> {
        tracing::debug!(%family, chain_selector, to = %tx.to, "decoding transaction");

        if *family == Family::Evm {
            let value = native::native_value(tx).map_err(|err| {
                decode_error(family, chain_selector, tx, &err)
            })?;
            if native::is_native_transfer(tx, value) {
                return Ok(Some(native::native_transfer(tx, value)));
            }
        }

        let Some(decoder) = self.decoders.get(family) else {
            tracing::warn!(%family, chain_selector, "no decoder registered for chain family");
            return Ok(Some(DecodedCall::unsupported(&tx.to, family)));
        };

        match decoder.decode(tx) {
            Ok(Some(raw)) => Ok(Some(self.classify(tx, raw))),
            Ok(None) => Ok(None),
            Err(err) => match family.failure_policy() {
                FailurePolicy::Abort => Err(decode_error(family, chain_selector, tx, &err)),
                FailurePolicy::Inline => {
                    tracing::warn!(%family, chain_selector, to = %tx.to, error = %err, "transaction failed to decode");
                    Ok(Some(DecodedCall::failed(&tx.to, family, &err)))
                }
            },
        }
    }

    fn classify(&self, tx: &Transaction, raw: RawCall) -> DecodedCall {
        let contract_type = raw
            .contract_type
            .or_else(|| Some(tx.contract_type.clone()).filter(|t| !t.trim().is_empty()));
        DecodedCall {
            address: tx.to.clone(),
            method: raw.method,
            inputs: self.analyzers.classify_args(&raw.inputs),
            outputs: self.analyzers.classify_args(&raw.outputs),
            contract_type,
            contract_version: raw.contract_version,
        }
    }
}

fn decode_error(
    family: &Family,
    chain_selector: u64,
    tx: &Transaction,
    err: &anyhow::Error,
) -> ReportError {
    ReportError::Decode {
        family: family.clone(),
        selector: chain_selector,
        address: tx.to.clone(),
        reason: format!("{:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Descriptor, RawArg, RawValue};
    use crate::infrastructure::ChainTable;
    use anyhow::bail;
    use serde_json::json;

    const EVM: u64 = 5009297550715157269;
    const APTOS: u64 = 4741433654826277614;
    const SOLANA: u64 = 124615329519749607;
    const TRON: u64 = 77;

    fn chains() -> Arc<dyn ChainResolver> {
        let mut table = ChainTable::with_defaults();
        table.insert(TRON, "tron-mainnet", Family::Other("tron".to_string()));
        Arc::new(table)
    }

    fn failing(tx: &Transaction) -> anyhow::Result<Option<RawCall>> {
        bail!("unknown entry point for {}", tx.to)
    }

    fn set_chain(_tx: &Transaction) -> anyhow::Result<Option<RawCall>> {
        Ok(Some(RawCall {
            method: "set_chain".to_string(),
            inputs: vec![RawArg::new("chain_selector", "u64", RawValue::Number("7".into()))],
            ..RawCall::default()
        }))
    }

    #[test]
    fn test_unknown_selector_is_fatal() {
        let dispatcher = Dispatcher::new(chains());
        let err = dispatcher.decode(12345, &Transaction::new("0x1", vec![1u8])).unwrap_err();
        assert!(matches!(err, ReportError::UnknownFamily { selector: 12345, .. }));
        assert!(err.to_string().contains("12345"));
    }

    #[test]
    fn test_native_transfer_needs_no_decoder() {
        let dispatcher = Dispatcher::new(chains());
        let tx = Transaction::new("0xaaa", Vec::<u8>::new())
            .with_additional_fields(json!({"value": "1000000000000000000"}));
        let call = dispatcher.decode(EVM, &tx).unwrap().unwrap();
        assert_eq!(call.method, native::NATIVE_TRANSFER);
        assert_eq!(call.inputs.len(), 3);
    }

    #[test]
    fn test_malformed_evm_value_is_fatal() {
        let dispatcher = Dispatcher::new(chains());
        let tx = Transaction::new("0xaaa", Vec::<u8>::new())
            .with_additional_fields(json!({"value": "lots"}));
        assert!(matches!(
            dispatcher.decode(EVM, &tx),
            Err(ReportError::Decode { .. })
        ));
    }

    #[test]
    fn test_abort_policy() {
        let dispatcher = Dispatcher::new(chains()).with_decoder(Family::Solana, failing);
        let err = dispatcher.decode(SOLANA, &Transaction::new("Prog1", vec![1u8])).unwrap_err();
        assert!(err.to_string().contains("unknown entry point for Prog1"));
    }

    #[test]
    fn test_inline_policy() {
        let dispatcher = Dispatcher::new(chains()).with_decoder(Family::Aptos, failing);
        let call = dispatcher
            .decode(APTOS, &Transaction::new("0x1", vec![1u8]))
            .unwrap()
            .unwrap();
        assert!(call.method.starts_with("failed to decode aptos transaction"));
        assert!(call.inputs.is_empty() && call.outputs.is_empty());
    }

    #[test]
    fn test_unsupported_family() {
        let dispatcher = Dispatcher::new(chains());
        let call = dispatcher
            .decode(TRON, &Transaction::new("T1", vec![1u8]))
            .unwrap()
            .unwrap();
        assert_eq!(call.address, "T1");
        assert!(call.method.contains("not supported"));
        assert!(call.method.contains("tron"));
    }

    #[test]
    fn test_arguments_are_classified() {
        let dispatcher = Dispatcher::new(chains()).with_decoder(Family::Aptos, set_chain);
        let mut tx = Transaction::new("0x1", vec![1u8]);
        tx.contract_type = "ManyChainMultiSig".to_string();
        let call = dispatcher.decode(APTOS, &tx).unwrap().unwrap();
        assert_eq!(call.inputs[0].value, Descriptor::ChainSelector(7));
        assert_eq!(call.contract_type.as_deref(), Some("ManyChainMultiSig"));
    }
}
