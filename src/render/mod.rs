//! Report renderers
//!
//! Both renderers share the summarization contract in [`summary`]; they only
//! differ in how summaries, notes and detail blocks are laid out.

mod markdown;
pub mod summary;
mod text;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{
    AnnotationContext, BatchReport, ChainResolver, DecodedCall, Descriptor, DescriptorContext,
    MarshalRules, NamedDescriptor, OperationReport, ProposalReport,
};
use crate::report::Annotator;

pub use markdown::MarkdownRenderer;
pub use summary::{Style, Summary};
pub use text::TextRenderer;

/// Renderer settings; the summarization thresholds are fixed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Formatting rules for structured values
    #[serde(default)]
    pub marshal: MarshalRules,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
}

/// Turns decoded calls and reports into review text
pub trait Renderer {
    fn render_call(&self, call: &DecodedCall, ctx: &AnnotationContext) -> String;

    fn render_proposal(&self, operations: &[OperationReport], ctx: &AnnotationContext) -> String;

    fn render_timelock(&self, batches: &[BatchReport], ctx: &AnnotationContext) -> String;

    fn render_report(&self, report: &ProposalReport, ctx: &AnnotationContext) -> String {
        match report {
            ProposalReport::Operations(operations) => self.render_proposal(operations, ctx),
            ProposalReport::Batches(batches) => self.render_timelock(batches, ctx),
        }
    }
}

/// Build the renderer for `format`
pub fn renderer(
    format: OutputFormat,
    chains: Arc<dyn ChainResolver>,
    config: RenderConfig,
) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer::new(chains, config)),
        OutputFormat::Markdown => Box::new(MarkdownRenderer::new(chains, config)),
    }
}

/// One argument, ready to be laid out
struct ArgView {
    name: String,
    summary: Summary,
    /// Address annotation, shown after the summary
    note: Option<String>,
}

/// Everything a renderer needs to lay out one call
struct CallView {
    address_note: Option<String>,
    contract: Option<String>,
    inputs: Vec<ArgView>,
    outputs: Vec<ArgView>,
}

impl CallView {
    fn build(
        call: &DecodedCall,
        chains: &dyn ChainResolver,
        config: &RenderConfig,
        ctx: &AnnotationContext,
    ) -> Self {
        let descriptors = DescriptorContext::new(chains, config.marshal);
        let annotator = Annotator::new(chains);
        let args = |args: &[NamedDescriptor]| -> Vec<ArgView> {
            args.iter()
                .map(|arg| ArgView {
                    name: arg.name.clone(),
                    summary: summary::summarize(&arg.value, &descriptors),
                    note: match &arg.value {
                        Descriptor::Address(address) => {
                            address_note(&annotator, address, ctx)
                        }
                        _ => None,
                    },
                })
                .collect()
        };

        let contract = call.contract_type.as_ref().map(|contract_type| {
            match &call.contract_version {
                Some(version) => format!("{} {}", contract_type, version),
                None => contract_type.clone(),
            }
        });

        Self {
            address_note: address_note(&annotator, &call.address, ctx),
            contract,
            inputs: args(&call.inputs),
            outputs: args(&call.outputs),
        }
    }

    fn sections(&self) -> [(&'static str, &[ArgView]); 2] {
        [("Inputs", self.inputs.as_slice()), ("Outputs", self.outputs.as_slice())]
    }
}

fn address_note(annotator: &Annotator<'_>, address: &str, ctx: &AnnotationContext) -> Option<String> {
    match annotator.address(address, ctx) {
        Ok(note) if note.is_empty() => None,
        Ok(note) => Some(note),
        Err(err) => Some(format!("Error rendering annotation for {}: {}", address, err)),
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{} {}", count, one)
    } else {
        format!("{} {}", count, many)
    }
}
