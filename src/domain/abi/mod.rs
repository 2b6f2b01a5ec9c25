//! EVM ABI models, independent of the alloy-based loader and decoder

mod registry;

pub use registry::{AbiRegistry, FunctionSignature, ParamSpec};
