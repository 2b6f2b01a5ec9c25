//! Plain-text renderer for terminals and logs

use std::fmt::{self, Write};
use std::sync::Arc;

use super::{plural, CallView, RenderConfig, Renderer};
use crate::domain::descriptor::{indent_block, INDENT};
use crate::domain::{AnnotationContext, BatchReport, ChainResolver, DecodedCall, OperationReport};

const DETAIL_INDENT: &str = "    ";

pub struct TextRenderer {
    chains: Arc<dyn ChainResolver>,
    config: RenderConfig,
}

impl TextRenderer {
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

        write!(out, "Address: {}", call.address)?;
        if let Some(note) = &view.address_note {
            write!(out, " ({})", note)?;
        }
        if let Some(contract) = &view.contract {
            write!(out, "\nContract: {}", contract)?;
        }
        write!(out, "\nMethod: {}", call.method)?;

        for (title, args) in view.sections() {
            if args.is_empty() {
                continue;
            }
            write!(out, "\n{}:", title)?;
            for arg in args {
                write!(out, "\n{}{}: {}", INDENT, arg.name, arg.summary.text)?;
                if let Some(note) = &arg.note {
                    write!(out, " ({})", note)?;
                }
                if let Some(detail) = &arg.summary.detail {
                    write!(out, "\n{}", indent_block(detail, DETAIL_INDENT))?;
                }
            }
        }
        Ok(())
    }

    fn write_operation(
        &self,
        out: &mut String,
        operation: &OperationReport,
        ctx: &AnnotationContext,
        prefix: &str,
    ) {
        if operation.calls.is_empty() {
            out.push_str(prefix);
            out.push_str("(no call data)");
            return;
        }
        let calls: Vec<String> = operation
            .calls
            .iter()
            .map(|call| indent_block(&self.render_call(call, ctx), prefix))
            .collect();
        out.push_str(&calls.join("\n\n"));
    }
}

impl Renderer for TextRenderer {
    fn render_call(&self, call: &DecodedCall, ctx: &AnnotationContext) -> String {
        let mut out = String::new();
        match self.write_call(&mut out, call, ctx) {
            Ok(()) => out,
            Err(err) => format!("Error rendering call {}: {}", call.address, err),
        }
    }

    fn render_proposal(&self, operations: &[OperationReport], ctx: &AnnotationContext) -> String {
        let mut out = format!(
            "Proposal with {}",
            plural(operations.len(), "operation", "operations")
        );
        for (idx, operation) in operations.iter().enumerate() {
            out.push_str(&format!(
                "\n\nOperation #{}: {} ({}, {})\n",
                idx + 1,
                operation.chain_name,
                operation.chain_selector,
                operation.family
            ));
            self.write_operation(&mut out, operation, ctx, INDENT);
        }
        out
    }

    fn render_timelock(&self, batches: &[BatchReport], ctx: &AnnotationContext) -> String {
        let mut out = format!(
            "Timelock proposal with {}",
            plural(batches.len(), "batch", "batches")
        );
        let nested = INDENT.repeat(2);
        for (idx, batch) in batches.iter().enumerate() {
            out.push_str(&format!(
                "\n\nBatch #{}: {} ({}, {}) with {}",
                idx + 1,
                batch.chain_name,
                batch.chain_selector,
                batch.family,
                plural(batch.operations.len(), "operation", "operations")
            ));
            for (op_idx, operation) in batch.operations.iter().enumerate() {
                out.push_str(&format!("\n{}Operation #{}.{}\n", INDENT, idx + 1, op_idx + 1));
                self.write_operation(&mut out, operation, ctx, &nested);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AddressBook, Descriptor, Family, NamedDescriptor, TypeAndVersion};
    use crate::infrastructure::ChainTable;

    fn renderer() -> TextRenderer {
        TextRenderer::new(Arc::new(ChainTable::with_defaults()), RenderConfig::default())
    }

    fn transfer() -> DecodedCall {
        DecodedCall::new("0xAbC0000000000000000000000000000000000001", "transfer").with_inputs(vec![
            NamedDescriptor::new(
                "to",
                Descriptor::address("0x00000000000000000000000000000000000000B0"),
            ),
            NamedDescriptor::new("amount", Descriptor::simple("1000")),
        ])
    }

    #[test]
    fn test_render_call_layout() {
        let out = renderer().render_call(&transfer(), &AnnotationContext::new());
        assert_eq!(
            out,
            "Address: 0xAbC0000000000000000000000000000000000001\n\
             Method: transfer\n\
             Inputs:\n  \
             to: 0x00000000000000000000000000000000000000B0\n  \
             amount: 1000"
        );
    }

    #[test]
    fn test_render_call_without_args_has_no_sections() {
        let call = DecodedCall::new("0x1", "pause");
        let out = renderer().render_call(&call, &AnnotationContext::new());
        assert_eq!(out, "Address: 0x1\nMethod: pause");
    }

    #[test]
    fn test_render_call_with_contract_and_annotation() {
        let mut book = AddressBook::new();
        book.insert(
            5009297550715157269,
            "0x00000000000000000000000000000000000000B0",
            TypeAndVersion::new("Router", "1.2.0"),
        );
        let ctx = AnnotationContext::with_address_book(book);
        let mut call = transfer();
        call.contract_type = Some("Token".to_string());
        call.contract_version = Some("1.0.0".to_string());

        let out = renderer().render_call(&call, &ctx);
        assert!(out.contains("\nContract: Token 1.0.0\n"));
        assert!(out.contains(
            "to: 0x00000000000000000000000000000000000000B0 (address of Router 1.2.0 from ethereum-mainnet)"
        ));
    }

    #[test]
    fn test_render_proposal_headers() {
        let operations = vec![
            OperationReport {
                chain_selector: 5009297550715157269,
                chain_name: "ethereum-mainnet".to_string(),
                family: Family::Evm,
                calls: vec![DecodedCall::new("0x1", "pause")],
            },
            OperationReport {
                chain_selector: 7,
                chain_name: "<chain unknown>".to_string(),
                family: Family::Evm,
                calls: vec![],
            },
        ];
        let out = renderer().render_proposal(&operations, &AnnotationContext::new());
        assert!(out.starts_with("Proposal with 2 operations\n\n"));
        assert!(out.contains("Operation #1: ethereum-mainnet (5009297550715157269, evm)\n  Address: 0x1\n  Method: pause"));
        assert!(out.ends_with("Operation #2: <chain unknown> (7, evm)\n  (no call data)"));
    }

    #[test]
    fn test_render_timelock_headers() {
        let batches = vec![BatchReport {
            chain_selector: 5009297550715157269,
            chain_name: "ethereum-mainnet".to_string(),
            family: Family::Evm,
            operations: vec![OperationReport {
                chain_selector: 5009297550715157269,
                chain_name: "ethereum-mainnet".to_string(),
                family: Family::Evm,
                calls: vec![DecodedCall::new("0x1", "pause")],
            }],
        }];
        let out = renderer().render_timelock(&batches, &AnnotationContext::new());
        assert!(out.starts_with("Timelock proposal with 1 batch\n\n"));
        assert!(out.contains("Batch #1: ethereum-mainnet (5009297550715157269, evm) with 1 operation"));
        assert!(out.contains("\n  Operation #1.1\n    Address: 0x1\n    Method: pause"));
    }
}
