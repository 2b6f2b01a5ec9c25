use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use propscope::config;
use propscope::domain::{
    AnnotationContext, ChainResolver, Family, Proposal, ProposalInput, TimelockProposal,
};
use propscope::infrastructure::EvmDecoder;
use propscope::render::{self, OutputFormat};
use propscope::report::{Dispatcher, ReportBuilder};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Markdown,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Markdown => OutputFormat::Markdown,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "propscope",
    version,
    about = "Render multi-chain governance proposals for human review"
)]
struct Args {
    /// Proposal JSON file
    proposal: PathBuf,

    /// Treat the input as a timelock proposal (batches of transactions)
    #[arg(long)]
    timelock: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Config file (overrides PROPSCOPE_CONFIG and the default location)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    let input = read_proposal(&args)?;

    let chains: Arc<dyn ChainResolver> = Arc::new(config.chain_table());
    let registry = config.abi_registry();
    tracing::debug!(functions = registry.len(), "loaded ABI registry");
    let dispatcher =
        Dispatcher::new(Arc::clone(&chains)).with_decoder(Family::Evm, EvmDecoder::new(registry));

    let report = ReportBuilder::new(&dispatcher)
        .build(&input)
        .context("failed to build proposal report")?;

    let ctx = AnnotationContext::with_address_book(config.address_book());
    let renderer = render::renderer(args.format.into(), chains, config.render);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", renderer.render_report(&report, &ctx))?;
    Ok(())
}

fn read_proposal(args: &Args) -> Result<ProposalInput> {
    let content = fs::read_to_string(&args.proposal)
        .with_context(|| format!("failed to read {}", args.proposal.display()))?;
    let input = if args.timelock {
        let proposal: TimelockProposal = serde_json::from_str(&content)
            .with_context(|| format!("invalid timelock proposal {}", args.proposal.display()))?;
        ProposalInput::Timelock(proposal)
    } else {
        let proposal: Proposal = serde_json::from_str(&content)
            .with_context(|| format!("invalid proposal {}", args.proposal.display()))?;
        ProposalInput::Simple(proposal)
    };
    Ok(input)
}
