//! Rendering of decoded calls and whole reports

use std::sync::Arc;

use proptest::prelude::*;

use propscope::domain::{
    AddressBook, AnnotationContext, BatchReport, BytesFormat, DecodedCall, Descriptor, Family,
    MarshalRules, NamedDescriptor, OperationReport, ProposalReport, TypeAndVersion, YamlValue,
    ADDRESSES_BY_CHAIN,
};
use propscope::infrastructure::ChainTable;
use propscope::render::{
    renderer, MarkdownRenderer, OutputFormat, RenderConfig, Renderer, TextRenderer,
};

const ETHEREUM: u64 = 5009297550715157269;
const TIMELOCK: &str = "0x00000000000000000000000000000000000000AA";

fn chains() -> Arc<ChainTable> {
    Arc::new(ChainTable::with_defaults())
}

fn text() -> TextRenderer {
    TextRenderer::new(chains(), RenderConfig::default())
}

fn markdown() -> MarkdownRenderer {
    MarkdownRenderer::new(chains(), RenderConfig::default())
}

fn context() -> AnnotationContext {
    let mut book = AddressBook::new();
    book.insert(ETHEREUM, TIMELOCK, TypeAndVersion::new("RBACTimelock", "1.0.0"));
    AnnotationContext::with_address_book(book)
}

fn schedule_call() -> DecodedCall {
    DecodedCall::new(TIMELOCK, "scheduleBatch").with_inputs(vec![
        NamedDescriptor::new("target", Descriptor::address(TIMELOCK)),
        NamedDescriptor::new("destChain", Descriptor::ChainSelector(ETHEREUM)),
        NamedDescriptor::new("payload", Descriptor::Bytes(vec![0x11; 64])),
        NamedDescriptor::new(
            "calls",
            Descriptor::Array(vec![
                Descriptor::simple("1"),
                Descriptor::simple("2"),
                Descriptor::simple("3"),
                Descriptor::simple("4"),
            ]),
        ),
        NamedDescriptor::new("note", Descriptor::simple("x".repeat(100))),
    ])
}

#[test]
fn test_render_is_idempotent() {
    let call = schedule_call();
    let ctx = context();
    assert_eq!(text().render_call(&call, &ctx), text().render_call(&call, &ctx));
    assert_eq!(
        markdown().render_call(&call, &ctx),
        markdown().render_call(&call, &ctx)
    );
}

#[test]
fn test_zero_arg_call_renders_header_only() {
    let call = DecodedCall::new("0x1", "pause");
    let out = text().render_call(&call, &AnnotationContext::new());
    assert!(!out.contains("Inputs"));
    assert!(!out.contains("Outputs"));

    let out = markdown().render_call(&call, &AnnotationContext::new());
    assert_eq!(out, "**Address:** `0x1`\n\n**Method:** `pause`");
}

#[test]
fn test_text_render_annotations_and_details() {
    let out = text().render_call(&schedule_call(), &context());
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(
        lines[0],
        format!("Address: {} (address of RBACTimelock 1.0.0 from ethereum-mainnet)", TIMELOCK)
    );
    assert_eq!(lines[1], "Method: scheduleBatch");
    assert_eq!(lines[2], "Inputs:");
    assert!(lines[3].starts_with("  target: 0x"));
    assert!(lines[3].ends_with("(address of RBACTimelock 1.0.0 from ethereum-mainnet)"));
    assert_eq!(lines[4], format!("  destChain: {} (ethereum-mainnet)", ETHEREUM));
    assert!(lines[5].starts_with("  payload: bytes(len=64): 0x1111"));
    // bytes detail carries the full hex
    assert_eq!(lines[6], format!("    0x{}", "11".repeat(64)));
    assert!(out.contains("  calls: array[4]: [1, 2, 3, … (+1)]"));
    assert!(out.contains("  note: string(len=100): "));
    assert!(out.contains(&format!("\n    {}", "x".repeat(100))));
}

#[test]
fn test_markdown_details_blocks() {
    let out = markdown().render_call(&schedule_call(), &context());
    assert!(out.contains("- `destChain`: `5009297550715157269 (ethereum-mainnet)`"));
    assert!(out.contains("<sub><i>address of RBACTimelock 1.0.0 from ethereum-mainnet</i></sub>"));
    // bytes, array and long string each get a details block
    assert_eq!(out.matches("<details><summary>details</summary>").count(), 3);
    assert_eq!(out.matches("</details>").count(), 3);
}

fn withdraw_call() -> DecodedCall {
    DecodedCall::new("0x1", "withdraw")
        .with_inputs(vec![NamedDescriptor::new("amount", Descriptor::simple("1000"))])
        .with_outputs(vec![
            NamedDescriptor::new("success", Descriptor::simple("true")),
            NamedDescriptor::new("remaining", Descriptor::simple("5")),
        ])
}

#[test]
fn test_text_render_lists_outputs_after_inputs() {
    let out = text().render_call(&withdraw_call(), &AnnotationContext::new());
    assert_eq!(
        out,
        "Address: 0x1\nMethod: withdraw\nInputs:\n  amount: 1000\nOutputs:\n  success: true\n  remaining: 5"
    );
}

#[test]
fn test_markdown_render_lists_outputs_after_inputs() {
    let out = markdown().render_call(&withdraw_call(), &AnnotationContext::new());
    assert_eq!(
        out,
        "**Address:** `0x1`\n\n**Method:** `withdraw`\n\n**Inputs:**\n\n- `amount`: `1000`\
         \n\n**Outputs:**\n\n- `success`: `true`\n- `remaining`: `5`"
    );
}

#[test]
fn test_annotation_mismatch_renders_inline() {
    let mut ctx = AnnotationContext::new();
    ctx.insert(ADDRESSES_BY_CHAIN, vec![1u8, 2, 3]);
    let out = text().render_call(&schedule_call(), &ctx);
    assert!(out.starts_with(&format!(
        "Address: {} (Error rendering annotation for {}:",
        TIMELOCK, TIMELOCK
    )));
    assert!(out.contains("Method: scheduleBatch"));
}

#[test]
fn test_yaml_uses_configured_bytes_format() {
    let call = DecodedCall::new("0x1", "setConfig").with_inputs(vec![NamedDescriptor::new(
        "config",
        Descriptor::Yaml(YamlValue::map([("blob", YamlValue::Bytes(vec![1, 2, 3]))])),
    )]);
    let config = RenderConfig {
        marshal: MarshalRules {
            bytes: BytesFormat::Base64,
        },
    };
    let out = renderer(OutputFormat::Markdown, chains(), config)
        .render_call(&call, &AnnotationContext::new());
    assert!(out.contains("AQID"));
}

#[test]
fn test_render_report_dispatches_on_shape() {
    let operation = OperationReport {
        chain_selector: ETHEREUM,
        chain_name: "ethereum-mainnet".to_string(),
        family: Family::Evm,
        calls: vec![DecodedCall::new("0x1", "pause")],
    };
    let flat = ProposalReport::Operations(vec![operation.clone()]);
    let batched = ProposalReport::Batches(vec![BatchReport {
        chain_selector: ETHEREUM,
        chain_name: "ethereum-mainnet".to_string(),
        family: Family::Evm,
        operations: vec![operation],
    }]);

    let ctx = AnnotationContext::new();
    assert!(text().render_report(&flat, &ctx).starts_with("Proposal with 1 operation"));
    assert!(text()
        .render_report(&batched, &ctx)
        .starts_with("Timelock proposal with 1 batch"));
    assert!(markdown().render_report(&flat, &ctx).starts_with("# Proposal"));
    assert!(markdown()
        .render_report(&batched, &ctx)
        .contains("### Operation 1.1"));
}

proptest! {
    #[test]
    fn prop_text_render_is_deterministic(method in "[a-zA-Z_]{1,20}", value in ".{0,200}") {
        let call = DecodedCall::new("0x1", method)
            .with_inputs(vec![NamedDescriptor::new("v", Descriptor::simple(value))]);
        let ctx = AnnotationContext::new();
        prop_assert_eq!(text().render_call(&call, &ctx), text().render_call(&call, &ctx));
    }
}
