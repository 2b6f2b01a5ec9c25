//! Field classification
//!
//! An [`AnalyzerChain`] turns raw decoder output into [`Descriptor`]s. It
//! asks each [`Analyzer`] in order and takes the first answer, falling back
//! to structural recursion when none matches. Caller-supplied analyzers run
//! ahead of the built-in ones, so consumers can override default behaviour
//! without touching the chain itself.

mod builtin;

use crate::domain::{Descriptor, NamedDescriptor, RawArg, RawValue};

pub use builtin::{BytesAndAddressAnalyzer, ChainSelectorAnalyzer};

/// A pluggable classification step
pub trait Analyzer: Send + Sync {
    /// Classify one value, or return `None` to defer to the next analyzer
    ///
    /// `chain` is the full chain, for analyzers that need to classify
    /// nested values themselves.
    fn analyze(
        &self,
        name: &str,
        type_tag: &str,
        value: &RawValue,
        chain: &AnalyzerChain,
    ) -> Option<Descriptor>;
}

impl<F> Analyzer for F
where
    F: Fn(&str, &str, &RawValue, &AnalyzerChain) -> Option<Descriptor> + Send + Sync,
{
    fn analyze(
        &self,
        name: &str,
        type_tag: &str,
        value: &RawValue,
        chain: &AnalyzerChain,
    ) -> Option<Descriptor> {
        self(name, type_tag, value, chain)
    }
}

/// Ordered list of analyzers with a structural fallback
pub struct AnalyzerChain {
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl Default for AnalyzerChain {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl AnalyzerChain {
    /// Build a chain running `custom` first, then the built-in analyzers
    pub fn new(custom: Vec<Box<dyn Analyzer>>) -> Self {
        let mut analyzers = custom;
        analyzers.push(Box::new(BytesAndAddressAnalyzer));
        analyzers.push(Box::new(ChainSelectorAnalyzer::new()));
        Self { analyzers }
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Classify a value into a descriptor
    pub fn classify(&self, name: &str, type_tag: &str, value: &RawValue) -> Descriptor {
        for analyzer in &self.analyzers {
            if let Some(descriptor) = analyzer.analyze(name, type_tag, value, self) {
                return descriptor;
            }
        }

        match value {
            RawValue::Struct(fields) => Descriptor::Struct(self.classify_args(fields)),
            RawValue::Array(items) => {
                let element_tag = element_type(type_tag);
                Descriptor::Array(
                    items
                        .iter()
                        .map(|item| self.classify(name, element_tag, item))
                        .collect(),
                )
            }
            RawValue::Structured(value) => Descriptor::Yaml(value.clone()),
            other => Descriptor::Simple(other.to_string()),
        }
    }

    /// Classify an ordered argument list, preserving order and names
    pub fn classify_args(&self, args: &[RawArg]) -> Vec<NamedDescriptor> {
        args.iter()
            .map(|arg| NamedDescriptor::new(&arg.name, self.classify(&arg.name, &arg.type_tag, &arg.value)))
            .collect()
    }
}

/// Element type of an array type tag: `uint64[]` -> `uint64`,
/// `(bytes,address)[3]` -> `(bytes,address)`, `vector<u8>` and `[u8; 32]` -> `u8`
pub fn element_type(type_tag: &str) -> &str {
    let tag = type_tag.trim();
    if let Some(inner) = tag.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        if let Some((elem, _len)) = inner.split_once(';') {
            return elem.trim();
        }
    }
    if tag.ends_with(']') {
        if let Some(open) = tag.rfind('[') {
            return &tag[..open];
        }
    }
    if let Some(inner) = tag.strip_prefix("vector<").and_then(|t| t.strip_suffix('>')) {
        return inner;
    }
    tag
}
