use clap::Parser;
use dagr::cli::{Cli, Commands};
use dagr::cli_handlers;
use std::process;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let source = &cli.source;

    let result = match cli.command {
        Commands::Show { undirected } => {
            cli_handlers::handle_show(source, undirected).map(|()| true)
        }
        Commands::Heads { json } => cli_handlers::handle_heads(source, json).map(|()| true),
        Commands::Sort { json } => cli_handlers::handle_sort(source, json),
        Commands::Check { json } => cli_handlers::handle_check(source, json),
        Commands::Dataset => cli_handlers::handle_dataset(source).map(|()| true),
    };

    match result {
        Ok(true) => {}
        // A cyclic graph is a normal answer, reported through the exit status
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(2);
        }
    }
}
