//! Native value transfers, recognized without any contract decoder

use std::str::FromStr;

use alloy_primitives::U256;
use anyhow::{anyhow, bail, Context, Result};

use crate::domain::{DecodedCall, Descriptor, NamedDescriptor, Transaction};

/// Method name given to synthesized native transfers
pub const NATIVE_TRANSFER: &str = "native_transfer";

const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// Native value attached to an EVM transaction (`additionalFields.value`)
///
/// Accepts a JSON number or a decimal / `0x` hex string; absent means zero.
pub fn native_value(tx: &Transaction) -> Result<U256> {
    match tx.additional_fields.get("value") {
        None | Some(serde_json::Value::Null) => Ok(U256::ZERO),
        Some(serde_json::Value::String(s)) => {
            U256::from_str(s.trim()).with_context(|| format!("invalid native value '{}'", s))
        }
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| anyhow!("native value {} is not a non-negative integer; pass large values as strings", n)),
        Some(other) => bail!("native value must be a number or string, got {}", other),
    }
}

/// Whether `tx` is a plain value transfer: no call data, non-zero value
pub fn is_native_transfer(tx: &Transaction, value: U256) -> bool {
    tx.data.is_empty() && !value.is_zero()
}

/// Synthesize the decoded call for a native transfer
pub fn native_transfer(tx: &Transaction, value: U256) -> DecodedCall {
    DecodedCall::new(&tx.to, NATIVE_TRANSFER).with_inputs(vec![
        NamedDescriptor::new("recipient", Descriptor::address(&tx.to)),
        NamedDescriptor::new("amount_wei", Descriptor::simple(value.to_string())),
        NamedDescriptor::new("amount_eth", Descriptor::simple(format_ether(value))),
    ])
}

/// Wei as ether with exactly 18 decimal places
pub fn format_ether(wei: U256) -> String {
    let unit = U256::from(WEI_PER_ETHER);
    let whole = wei / unit;
    let frac = wei % unit;
    format!("{}.{:0>18}", whole, frac.to_string())
}
