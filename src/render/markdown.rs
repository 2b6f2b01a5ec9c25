//! Markdown renderer for review threads and pull requests

use std::fmt::{self, Write};
use std::sync::Arc;

use super::summary::Style;
use super::{plural, ArgView, CallView, RenderConfig, Renderer};
use crate::domain::{AnnotationContext, BatchReport, ChainResolver, DecodedCall, OperationReport};

pub struct MarkdownRenderer {
    chains: Arc<dyn ChainResolver>,
    config: RenderConfig,
}

impl MarkdownRenderer {
    pub fn new(chains: Arc<dyn ChainResolver>, config: RenderConfig) -> Self {
        Self { chains, config }
    }

    fn write_call(
        &self,
        out: &mut String,
        call: &DecodedCall,
        ctx: &AnnotationContext,
    ) -> fmt::Result {
        let view = CallView::build(call, self.chains.as_ref(), &self.config, ctx);

        write!(out, "**Address:** {}", code(&call.address))?;
        if let Some(note) = &view.address_note {
            write!(out, " {}", sub(note))?;
        }
        if let Some(contract) = &view.contract {
            write!(out, "\n\n**Contract:** {}", code(contract))?;
        }
        write!(out, "\n\n**Method:** {}", code(&call.method))?;

        for (title, args) in view.sections() {
            if args.is_empty() {
                continue;
            }
            write!(out, "\n\n**{}:**\n", title)?;
            for arg in args {
                write_arg(out, arg)?;
            }
        }
        Ok(())
    }

    fn write_operation(&self, out: &mut String, operation: &OperationReport, ctx: &AnnotationContext) {
        if operation.calls.is_empty() {
            out.push_str("_No call data._");
            return;
        }
        let calls: Vec<String> = operation
            .calls
            .iter()
            .map(|call| self.render_call(call, ctx))
            .collect();
        out.push_str(&calls.join("\n\n---\n\n"));
    }
}

impl Renderer for MarkdownRenderer {
    fn render_call(&self, call: &DecodedCall, ctx: &AnnotationContext) -> String {
        let mut out = String::new();
        match self.write_call(&mut out, call, ctx) {
            Ok(()) => out,
            Err(err) => format!("Error rendering call {}: {}", code(&call.address), err),
        }
    }

    fn render_proposal(&self, operations: &[OperationReport], ctx: &AnnotationContext) -> String {
        let mut out = format!(
            "# Proposal\n\n{}",
            plural(operations.len(), "operation", "operations")
        );
        for (idx, operation) in operations.iter().enumerate() {
            out.push_str(&format!(
                "\n\n## Operation {}: {}\n\n_Chain selector {}, family {}_\n\n",
                idx + 1,
                escape_html(&operation.chain_name),
                code(&operation.chain_selector.to_string()),
                code(operation.family.as_str())
            ));
            self.write_operation(&mut out, operation, ctx);
        }
        out
    }

    fn render_timelock(&self, batches: &[BatchReport], ctx: &AnnotationContext) -> String {
        let mut out = format!(
            "# Timelock proposal\n\n{}",
            plural(batches.len(), "batch", "batches")
        );
        for (idx, batch) in batches.iter().enumerate() {
            out.push_str(&format!(
                "\n\n## Batch {}: {}\n\n_Chain selector {}, family {}, {}_",
                idx + 1,
                escape_html(&batch.chain_name),
                code(&batch.chain_selector.to_string()),
                code(batch.family.as_str()),
                plural(batch.operations.len(), "operation", "operations")
            ));
            for (op_idx, operation) in batch.operations.iter().enumerate() {
                out.push_str(&format!("\n\n### Operation {}.{}\n\n", idx + 1, op_idx + 1));
                self.write_operation(&mut out, operation, ctx);
            }
        }
        out
    }
}

fn write_arg(out: &mut String, arg: &ArgView) -> fmt::Result {
    let summary = match arg.summary.style {
        Style::Quoted => code(&arg.summary.text),
        Style::Bare => escape_html(&arg.summary.text),
    };
    write!(out, "\n- {}: {}", code(&arg.name), summary)?;
    if let Some(note) = &arg.note {
        write!(out, " {}", sub(note))?;
    }
    if let Some(detail) = &arg.summary.detail {
        let fence = fence_for(detail);
        write!(
            out,
            "\n  <details><summary>details</summary>\n\n  {fence}\n{}\n  {fence}\n\n  </details>",
            crate::domain::descriptor::indent_block(detail, "  "),
        )?;
    }
    Ok(())
}

/// Inline code span that survives backticks in `text`
fn code(text: &str) -> String {
    let longest = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    if longest == 0 {
        return format!("`{}`", text);
    }
    let ticks = "`".repeat(longest + 1);
    format!("{ticks} {} {ticks}", text)
}

fn sub(text: &str) -> String {
    format!("<sub><i>{}</i></sub>", escape_html(text))
}

/// Text outside code spans is read as HTML by GitHub
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn fence_for(text: &str) -> &'static str {
    if text.contains("```") {
        "~~~"
    } else {
        "```"
    }
}
