//! EVM call decoder implementation using alloy-dyn-abi

use alloy_dyn_abi::{DynSolType, DynSolValue};
use anyhow::{anyhow, bail, Context, Result};

use crate::analyzer::element_type;
use crate::domain::abi::{AbiRegistry, FunctionSignature, ParamSpec};
use crate::domain::{CallDecoder, RawArg, RawCall, RawValue, Transaction};

/// EVM decoder backed by an [`AbiRegistry`]
pub struct EvmDecoder {
    registry: AbiRegistry,
}

impl EvmDecoder {
    /// Create a new decoder with the given registry
    pub fn new(registry: AbiRegistry) -> Self {
        Self { registry }
    }

    /// Decode calldata (selector included) against a known function
    pub fn decode_calldata(&self, function: &FunctionSignature, data: &[u8]) -> Result<RawCall> {
        if data.len() < 4 {
            bail!("calldata too short (need at least 4 bytes for selector)");
        }

        let selector = &data[..4];
        if selector != function.selector {
            bail!(
                "selector mismatch: got 0x{}, expected {}",
                hex::encode(selector),
                function.selector_hex()
            );
        }

        let types: Vec<DynSolType> = function
            .inputs
            .iter()
            .map(|param| {
                param.kind.parse::<DynSolType>().with_context(|| {
                    format!("failed to parse type '{}' for param '{}'", param.kind, param.name)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let values = if types.is_empty() {
            Vec::new()
        } else {
            let decoded = DynSolType::Tuple(types)
                .abi_decode_params(&data[4..])
                .with_context(|| format!("failed to decode arguments of {}", function.signature))?;
            match decoded {
                DynSolValue::Tuple(values) => values,
                other => vec![other],
            }
        };

        let inputs = function
            .inputs
            .iter()
            .zip(values.iter())
            .enumerate()
            .map(|(idx, (param, value))| {
                let name = if param.name.trim().is_empty() {
                    format!("arg{}", idx)
                } else {
                    param.name.clone()
                };
                RawArg::new(name, param.kind.clone(), to_raw(value, param))
            })
            .collect();

        Ok(RawCall {
            method: function.signature.clone(),
            inputs,
            ..RawCall::default()
        })
    }
}

impl CallDecoder for EvmDecoder {
    fn decode(&self, tx: &Transaction) -> Result<Option<RawCall>> {
        let data = &tx.data[..];
        if data.is_empty() {
            return Ok(None);
        }

        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| anyhow!("calldata too short (need at least 4 bytes for selector)"))?;
        let function = self
            .registry
            .lookup(selector)
            .ok_or_else(|| anyhow!("no ABI registered for selector 0x{}", hex::encode(selector)))?;

        let mut call = self.decode_calldata(function, data)?;
        if !tx.contract_type.is_empty() {
            call.contract_type = Some(tx.contract_type.clone());
        }
        Ok(Some(call))
    }
}

/// Convert a decoded value, carrying tuple component names along
fn to_raw(value: &DynSolValue, spec: &ParamSpec) -> RawValue {
    match value {
        DynSolValue::Bool(b) => RawValue::Bool(*b),
        DynSolValue::Int(i, _) => RawValue::Number(i.to_string()),
        DynSolValue::Uint(u, _) => RawValue::Number(u.to_string()),
        DynSolValue::FixedBytes(word, size) => {
            RawValue::FixedBytes(word.as_slice()[..(*size).min(32)].to_vec())
        }
        DynSolValue::Address(addr) => RawValue::Address(addr.to_checksum(None)),
        DynSolValue::Function(func) => RawValue::FixedBytes(func.as_slice().to_vec()),
        DynSolValue::Bytes(bytes) => RawValue::Bytes(bytes.clone()),
        DynSolValue::String(s) => RawValue::Text(s.clone()),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            let element = ParamSpec::new("", element_type(&spec.kind))
                .with_components(spec.components.clone());
            RawValue::Array(items.iter().map(|item| to_raw(item, &element)).collect())
        }
        DynSolValue::Tuple(fields) => RawValue::Struct(
            fields
                .iter()
                .enumerate()
                .map(|(idx, field)| {
                    let component = spec.components.get(idx);
                    let name = component
                        .map(|c| c.name.clone())
                        .filter(|n| !n.trim().is_empty())
                        .unwrap_or_else(|| format!("field{}", idx));
                    let fallback = ParamSpec::new("", "");
                    let component = component.unwrap_or(&fallback);
                    RawArg::new(name, component.kind.clone(), to_raw(field, component))
                })
                .collect(),
        ),
        #[allow(unreachable_patterns)]
        other => RawValue::Text(format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_transfer_function() -> FunctionSignature {
        FunctionSignature {
            selector: [0xa9, 0x05, 0x9c, 0xbb],
            name: "transfer".to_string(),
            signature: "transfer(address,uint256)".to_string(),
            inputs: vec![ParamSpec::new("to", "address"), ParamSpec::new("amount", "uint256")],
            source: PathBuf::from("test.json"),
        }
    }

    fn decoder() -> EvmDecoder {
        let mut registry = AbiRegistry::new();
        registry.insert(make_transfer_function());
        EvmDecoder::new(registry)
    }

    #[test]
    fn test_decode_transfer() {
        // transfer(0x1234567890123456789012345678901234567890, 1000)
        let calldata = hex::decode(
            "a9059cbb000000000000000000000000123456789012345678901234567890123456789000000000000000000000000000000000000000000000000000000000000003e8"
        ).unwrap();

        let tx = Transaction::new("0x00000000000000000000000000000000000000aa", calldata);
        let call = decoder().decode(&tx).unwrap().unwrap();

        assert_eq!(call.method, "transfer(address,uint256)");
        assert_eq!(call.inputs.len(), 2);
        assert_eq!(call.inputs[0].name, "to");
        assert_eq!(call.inputs[0].type_tag, "address");
        match &call.inputs[0].value {
            RawValue::Address(addr) => {
                assert!(addr.to_lowercase().contains("1234567890123456789012345678901234567890"))
            }
            other => panic!("expected address, got {:?}", other),
        }
        assert_eq!(call.inputs[1].value, RawValue::Number("1000".to_string()));
    }

    #[test]
    fn test_empty_calldata_has_no_call() {
        let tx = Transaction::new("0xaa", Vec::<u8>::new());
        assert!(decoder().decode(&tx).unwrap().is_none());
    }

    #[test]
    fn test_unknown_selector() {
        let tx = Transaction::new("0xaa", hex::decode("deadbeef").unwrap());
        let err = decoder().decode(&tx).unwrap_err();
        assert!(err.to_string().contains("0xdeadbeef"));
    }

    #[test]
    fn test_selector_mismatch() {
        let calldata = hex::decode("deadbeef").unwrap();
        let result = decoder().decode_calldata(&make_transfer_function(), &calldata);
        assert!(result.unwrap_err().to_string().contains("selector mismatch"));
    }

    #[test]
    fn test_tuple_array_keeps_component_names() {
        let components = vec![
            ParamSpec::new("remoteChainSelector", "uint64"),
            ParamSpec::new("allowed", "bool"),
        ];
        let spec = ParamSpec::new("updates", "(uint64,bool)[]").with_components(components);
        let value = DynSolValue::Array(vec![DynSolValue::Tuple(vec![
            DynSolValue::Uint(alloy_primitives::U256::from(7u64), 64),
            DynSolValue::Bool(true),
        ])]);

        let raw = to_raw(&value, &spec);
        assert_eq!(
            raw,
            RawValue::Array(vec![RawValue::Struct(vec![
                RawArg::new("remoteChainSelector", "uint64", RawValue::Number("7".into())),
                RawArg::new("allowed", "bool", RawValue::Bool(true)),
            ])])
        );
    }
}
