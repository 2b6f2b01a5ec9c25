//! Infrastructure layer - concrete collaborators
//!
//! This layer contains:
//! - ABI loading and EVM call decoding using alloy-dyn-abi
//! - A static chain-selector table

pub mod abi;
pub mod chains;

pub use abi::{AbiLoader, EvmDecoder};
pub use chains::ChainTable;
