mod cli;
mod context;
mod handlers;
mod output;
mod render;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;

fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("GRAPHKIT_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();
    let ctx = CliContext::load(cli.format.map(Into::into));

    let result = match cli.command {
        Commands::List(args) => handlers::list::handle(&ctx, args),
        Commands::Matrix(args) => handlers::matrix::handle(&ctx, args),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "graphkit", &mut std::io::stdout());
            Ok(())
        }
    };

    match result {
        Err(e) if ctx.is_json() => output::output_error(&format!("{:#}", e)),
        other => other,
    }
}
