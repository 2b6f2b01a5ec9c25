//! Argument summarization
//!
//! Every argument gets a one-line summary and, when the value needs more
//! room, a detail block. The thresholds here are fixed so that reports stay
//! comparable between runs and reviewers.

use crate::domain::descriptor::labeled;
use crate::domain::{Descriptor, DescriptorContext, NamedDescriptor};

/// Single ellipsis marker used by every truncation
pub const ELLIPSIS: &str = "…";

/// Simple strings up to this many characters are shown whole
pub const SIMPLE_INLINE_MAX: usize = 80;
/// Rendered structured values up to this many characters stay inline
pub const RENDERED_INLINE_MAX: usize = 120;
/// Longest rendered text still shown as a bare token
pub const BARE_TOKEN_MAX: usize = 50;
/// Leading and trailing bytes shown in a bytes summary
pub const BYTES_PREVIEW: usize = 16;
/// Width of one element preview inside an array summary
pub const COMPACT_MAX: usize = 24;
/// Leading and trailing bytes shown in an element preview
pub const COMPACT_BYTES_PREVIEW: usize = 4;
/// Elements previewed in an array summary
pub const ARRAY_PREVIEW_ITEMS: usize = 3;

/// `0x` strings longer than an EVM address are not bare tokens
const LONG_HEX_MIN: usize = 43;

const NO_FIELD_DATA: &str = "no field data available";

/// How a summary should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Plain text
    Bare,
    /// Literal value (code span in Markdown)
    Quoted,
}

/// Summary line and optional detail block of one argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    pub style: Style,
    pub detail: Option<String>,
}

impl Summary {
    fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::Quoted,
            detail: None,
        }
    }

    fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }
}

/// Summarize one descriptor
pub fn summarize(descriptor: &Descriptor, ctx: &DescriptorContext<'_>) -> Summary {
    match descriptor {
        Descriptor::Address(address) => Summary::quoted(address.clone()),
        Descriptor::ChainSelector(_) => Summary::quoted(descriptor.describe(ctx)),
        Descriptor::Bytes(bytes) => Summary::quoted(format!(
            "bytes(len={}): {}",
            bytes.len(),
            hex_preview(bytes, BYTES_PREVIEW)
        ))
        .with_detail(descriptor.describe(ctx)),
        Descriptor::Array(items) if items.is_empty() => Summary::quoted("[]"),
        Descriptor::Array(items) => {
            Summary::quoted(array_summary(items, ctx)).with_detail(array_detail(items, ctx))
        }
        Descriptor::Struct(fields) => Summary {
            text: format!("struct{{{} fields}}", fields.len()),
            style: Style::Bare,
            detail: Some(struct_detail(fields, ctx)),
        },
        Descriptor::Simple(value) => {
            let len = value.chars().count();
            if len <= SIMPLE_INLINE_MAX {
                Summary::quoted(value.clone())
            } else {
                Summary::quoted(format!(
                    "string(len={}): {}",
                    len,
                    middle_truncate(value, SIMPLE_INLINE_MAX)
                ))
                .with_detail(value.clone())
            }
        }
        Descriptor::Yaml(_) => summarize_rendered(descriptor.describe(ctx)),
    }
}

/// Summary of a structured value from its rendered text
fn summarize_rendered(rendered: String) -> Summary {
    if rendered.contains('\n') || rendered.chars().count() > RENDERED_INLINE_MAX {
        return Summary::quoted(middle_truncate(&collapse_lines(&rendered), RENDERED_INLINE_MAX))
            .with_detail(rendered);
    }
    if is_bare_token(&rendered) {
        return Summary {
            text: rendered.clone(),
            style: Style::Bare,
            detail: Some(rendered),
        };
    }
    Summary::quoted(rendered)
}

fn is_bare_token(text: &str) -> bool {
    !text.is_empty()
        && !text.contains(char::is_whitespace)
        && !text.contains('`')
        && !text.contains(": ")
        && !(text.starts_with("0x") && text.len() >= LONG_HEX_MIN)
        && text.chars().count() <= BARE_TOKEN_MAX
}

fn array_summary(items: &[Descriptor], ctx: &DescriptorContext<'_>) -> String {
    let mut previews: Vec<String> = items
        .iter()
        .take(ARRAY_PREVIEW_ITEMS)
        .map(|item| compact_preview(item, ctx))
        .collect();
    if items.len() > ARRAY_PREVIEW_ITEMS {
        previews.push(format!("{} (+{})", ELLIPSIS, items.len() - ARRAY_PREVIEW_ITEMS));
    }
    format!("array[{}]: [{}]", items.len(), previews.join(", "))
}

/// Every element, fully rendered, one `[i]: value` entry per element
pub fn array_detail(items: &[Descriptor], ctx: &DescriptorContext<'_>) -> String {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| labeled(&format!("[{}]", idx), &item.describe(ctx)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every field, fully rendered, one `name: value` entry per field
pub fn struct_detail(fields: &[NamedDescriptor], ctx: &DescriptorContext<'_>) -> String {
    if fields.is_empty() {
        return NO_FIELD_DATA.to_string();
    }
    fields
        .iter()
        .map(|field| labeled(&field.name, &field.value.describe(ctx)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Short preview of one array element
pub fn compact_preview(descriptor: &Descriptor, ctx: &DescriptorContext<'_>) -> String {
    match descriptor {
        Descriptor::Address(address) => address.clone(),
        Descriptor::ChainSelector(_) => descriptor.describe(ctx),
        Descriptor::Bytes(bytes) => hex_preview(bytes, COMPACT_BYTES_PREVIEW),
        Descriptor::Simple(value) => middle_truncate(value, COMPACT_MAX),
        Descriptor::Struct(_) => "struct".to_string(),
        Descriptor::Array(items) => format!("array[{}]", items.len()),
        Descriptor::Yaml(_) => middle_truncate(&collapse_lines(&descriptor.describe(ctx)), COMPACT_MAX),
    }
}

/// Keep the start and end of `text`, joined by one ellipsis, within `budget`
/// characters
pub fn middle_truncate(text: &str, budget: usize) -> String {
    let len = text.chars().count();
    if len <= budget {
        return text.to_string();
    }
    if budget <= 3 {
        return text.chars().take(budget).collect();
    }
    let keep = (budget - 1) / 2;
    let head: String = text.chars().take(keep).collect();
    let tail: String = text.chars().skip(len - keep).collect();
    format!("{}{}{}", head, ELLIPSIS, tail)
}

/// `0x` hex of `bytes`, or of the first and last `budget` bytes joined by an
/// ellipsis when longer
pub fn hex_preview(bytes: &[u8], budget: usize) -> String {
    if bytes.len() <= budget {
        return format!("0x{}", hex::encode(bytes));
    }
    format!(
        "0x{}{}{}",
        hex::encode(&bytes[..budget]),
        ELLIPSIS,
        hex::encode(&bytes[bytes.len() - budget..])
    )
}

/// Join non-empty trimmed lines with single spaces
pub fn collapse_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
