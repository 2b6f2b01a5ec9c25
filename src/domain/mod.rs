//! Domain models and contracts
//!
//! Pure data shapes and the traits that external collaborators (chain
//! resolvers, per-family decoders) implement.

pub mod abi;
pub mod chain;
pub mod context;
pub mod decoder;
pub mod descriptor;
pub mod proposal;
pub mod report;
pub mod yaml;

pub use chain::{ChainError, ChainResolver, FailurePolicy, Family, UNKNOWN_CHAIN};
pub use context::{AddressBook, AnnotationContext, ContextError, TypeAndVersion, ADDRESSES_BY_CHAIN};
pub use decoder::{CallDecoder, RawArg, RawCall, RawValue};
pub use descriptor::{Descriptor, DescriptorContext, NamedDescriptor};
pub use proposal::{BatchOperation, Operation, Proposal, ProposalInput, TimelockProposal, Transaction};
pub use report::{BatchReport, DecodedCall, OperationReport, ProposalReport};
pub use yaml::{BytesFormat, MarshalRules, YamlValue};
