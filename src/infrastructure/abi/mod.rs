//! ABI infrastructure - alloy-based ABI loading and EVM call decoding

mod decoder;
mod loader;

pub use decoder::EvmDecoder;
pub use loader::AbiLoader;
