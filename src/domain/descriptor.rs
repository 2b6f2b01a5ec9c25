//! Format-neutral decoded value tree
//!
//! Every per-family decoder ends up producing [`Descriptor`]s, so the
//! renderers only ever deal with these seven shapes.

use super::chain::ChainResolver;
use super::yaml::{MarshalRules, YamlValue};

/// One indentation step in multi-line renderings
pub const INDENT: &str = "  ";

/// Maximum width of an inline array or struct rendering
const INLINE_WIDTH: usize = 80;

/// Structs with more fields than this always render as a block
const INLINE_STRUCT_FIELDS: usize = 2;

/// Marker for a struct without fields, distinct from a failed parse
pub const EMPTY_STRUCT: &str = "{} (empty struct)";

/// A decoded value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// Opaque scalar already stringified by the decoder
    Simple(String),
    /// Raw binary data
    Bytes(Vec<u8>),
    /// Chain address in its native textual form
    Address(String),
    /// Cross-chain chain identifier
    ChainSelector(u64),
    /// Ordered elements
    Array(Vec<Descriptor>),
    /// Fields in declaration order
    Struct(Vec<NamedDescriptor>),
    /// Value that needs structured pretty-printing
    Yaml(YamlValue),
}

/// A descriptor with a field or argument name; names may repeat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDescriptor {
    pub name: String,
    pub value: Descriptor,
}

impl NamedDescriptor {
    pub fn new(name: impl Into<String>, value: Descriptor) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Collaborators needed to turn descriptors into text
#[derive(Clone, Copy)]
pub struct DescriptorContext<'a> {
    pub chains: &'a dyn ChainResolver,
    pub marshal: MarshalRules,
}

impl<'a> DescriptorContext<'a> {
    pub fn new(chains: &'a dyn ChainResolver, marshal: MarshalRules) -> Self {
        Self { chains, marshal }
    }
}

impl Descriptor {
    pub fn simple(value: impl Into<String>) -> Self {
        Descriptor::Simple(value.into())
    }

    pub fn address(value: impl Into<String>) -> Self {
        Descriptor::Address(value.into())
    }

    /// Render this value as text
    pub fn describe(&self, ctx: &DescriptorContext<'_>) -> String {
        match self {
            Descriptor::Simple(value) | Descriptor::Address(value) => value.clone(),
            Descriptor::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
            Descriptor::ChainSelector(selector) => {
                format!("{} ({})", selector, ctx.chains.name_or_unknown(*selector))
            }
            Descriptor::Array(elements) => describe_array(elements, ctx),
            Descriptor::Struct(fields) => describe_struct(fields, ctx),
            Descriptor::Yaml(value) => match ctx.marshal.marshal(value) {
                Ok(text) => text,
                Err(err) => format!("Error rendering yaml value: {}", err),
            },
        }
    }
}

fn describe_array(elements: &[Descriptor], ctx: &DescriptorContext<'_>) -> String {
    if elements.is_empty() {
        return "[]".to_string();
    }

    let rendered: Vec<String> = elements.iter().map(|e| e.describe(ctx)).collect();
    if rendered.iter().all(|r| !r.contains('\n')) {
        let inline = format!("[{}]", rendered.join(", "));
        if inline.chars().count() <= INLINE_WIDTH {
            return inline;
        }
    }

    let mut out = String::from("[\n");
    for item in &rendered {
        out.push_str(&indent_block(item, INDENT));
        out.push('\n');
    }
    out.push(']');
    out
}

fn describe_struct(fields: &[NamedDescriptor], ctx: &DescriptorContext<'_>) -> String {
    if fields.is_empty() {
        return EMPTY_STRUCT.to_string();
    }

    let rendered: Vec<(&str, String)> = fields
        .iter()
        .map(|field| (field.name.as_str(), field.value.describe(ctx)))
        .collect();

    if fields.len() <= INLINE_STRUCT_FIELDS && rendered.iter().all(|(_, v)| !v.contains('\n')) {
        let pairs: Vec<String> = rendered
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        let inline = format!("{{ {} }}", pairs.join(" "));
        if inline.chars().count() <= INLINE_WIDTH {
            return inline;
        }
    }

    let mut out = String::from("{\n");
    for (name, value) in &rendered {
        out.push_str(&indent_block(&labeled(name, value), INDENT));
        out.push('\n');
    }
    out.push('}');
    out
}

/// `name: value`, moving multi-line values that do not open a bracket onto
/// their own indented lines
pub fn labeled(name: &str, value: &str) -> String {
    if value.contains('\n') && !(value.starts_with('[') || value.starts_with('{')) {
        format!("{}:\n{}", name, indent_block(value, INDENT))
    } else {
        format!("{}: {}", name, value)
    }
}

/// Prefix every line of `text` with `prefix`
pub fn indent_block(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
