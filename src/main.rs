use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use std::io;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use chatops_demo::configs::agentops::AgentOpsConfig;
use chatops_demo::configs::base::EnvConfig;
use chatops_demo::configs::cohere::CohereProviderConfig;
use chatops_demo::demo::{connect, default_requests, run};
use chatops_demo::render::{ConsoleSink, WriterSink};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Chat model to use (can also be set via COHERE_MODEL, defaults to the service default)
    #[arg(short, long)]
    model: Option<String>,

    /// Session tag reported to AgentOps, repeatable (default: cohere-example)
    #[arg(short, long = "tag")]
    tags: Vec<String>,

    /// Print a notice for stream events other than generated text and the stream end
    #[arg(long)]
    show_events: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Ok(path) = dotenv() {
        debug!("Loaded environment from {:?}", path);
    }

    let mut cohere_config = CohereProviderConfig::from_env()?;
    if cli.model.is_some() {
        cohere_config.model = cli.model;
    }
    let agentops_config = AgentOpsConfig::from_env()?.with_tags(cli.tags);

    let (provider, mut agentops) = connect(cohere_config, agentops_config)?;

    let requests = default_requests();
    if console::user_attended() {
        let mut sink = ConsoleSink::new(cli.show_events);
        run(&provider, &mut agentops, &mut sink, &requests)?;
    } else {
        let mut sink = WriterSink::new(io::stdout().lock()).show_events(cli.show_events);
        run(&provider, &mut agentops, &mut sink, &requests)?;
    }

    Ok(())
}

/// Logs go to stderr so streamed text on stdout stays clean.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chatops_demo={},warn", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(io::stderr)
        .init();
}
