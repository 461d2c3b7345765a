use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use avi_lsp_core::{default_table, BuiltinTable, CompleterOptions};
use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod capabilities;
mod document;
mod handlers;
mod server;

#[derive(Parser)]
#[command(name = "avi-lsp")]
#[command(about = "Language Server for Avi")]
struct Cli {
    /// Use stdio for communication (required)
    #[arg(long)]
    stdio: bool,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// JSON builtin table to use instead of the bundled one
    #[arg(long, value_name = "PATH")]
    builtins: Option<PathBuf>,

    /// Do not suggest parameters of the function around the cursor
    #[arg(long)]
    no_scope_completions: bool,
}

impl Cli {
    fn completer_options(&self) -> CompleterOptions {
        CompleterOptions {
            scope_completions: !self.no_scope_completions,
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };

    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_builtins(path: Option<&Path>) -> anyhow::Result<BuiltinTable> {
    match path {
        Some(path) => {
            let table = BuiltinTable::load(path)
                .with_context(|| format!("Could not load builtins from {}", path.display()))?;
            tracing::info!("Loaded {} builtins from {}", table.len(), path.display());
            Ok(table)
        }
        None => Ok(default_table().clone()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if !args.stdio {
        eprintln!("Error: --stdio flag is required");
        std::process::exit(1);
    }

    init_logging(args.debug);

    let builtins = Arc::new(load_builtins(args.builtins.as_deref())?);
    let options = args.completer_options();
    let debug = args.debug;

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) =
        LspService::new(move |client| server::Backend::new(client, builtins, options, debug));

    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}
