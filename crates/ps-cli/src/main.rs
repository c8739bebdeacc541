//! planspeak CLI - describe query execution plans in plain English

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, GlobalArgs};
use commands::common::ExitCode;
use commands::{ast, dataset, graph, search, text};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let result = match &cli.command {
        cli::Commands::Text(args) => text::execute(args, &cli.global).await,
        cli::Commands::Ast(args) => ast::execute(args, &cli.global).await,
        cli::Commands::Graph(args) => graph::execute(args, &cli.global).await,
        cli::Commands::Dataset(args) => dataset::execute(args, &cli.global).await,
        cli::Commands::Search(args) => search::execute(args, &cli.global).await,
    };

    match result {
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(code) => std::process::exit(code.0),
            None => Err(err),
        },
        ok => ok,
    }
}

/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, defaulting to warn.
fn init_logging(global: &GlobalArgs) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if global.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}
