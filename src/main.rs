//! uri-router command-line tool.
//!
//! ```text
//! routes.toml ──▶ config ──▶ registry ──▶ dispatcher ──▶ presenter
//!                    ▲                         ▲
//!                    │ (watch mode)            │
//!              file watcher              stdin route lines
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, PoisonError};

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use uri_router::config::load_config;
use uri_router::config::watcher::ConfigWatcher;
use uri_router::dispatch::{DispatchFlag, DispatchFlags, Presentation, TracingPresenter};
use uri_router::lifecycle::{self, reload, signals, Shutdown};
use uri_router::observability::{logging, metrics};
use uri_router::routing::RouteKind;

#[derive(Parser)]
#[command(name = "uri-router")]
#[command(about = "Resolve and dispatch URI-shaped routes against a route table", long_about = None)]
struct Cli {
    /// Route table (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Print Prometheus metrics to stderr before exiting.
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a route and print the match as JSON
    Resolve { route: String },
    /// Exit successfully if the route resolves
    Check { route: String },
    /// List registered patterns by kind
    Routes,
    /// Dispatch a route and print what the presenter receives
    Dispatch {
        route: String,
        /// Extra argument, `key=value` (repeatable)
        #[arg(long = "arg", value_parser = parse_key_value)]
        args: Vec<(String, String)>,
        /// Dispatch flag, e.g. `override-same-route` (repeatable)
        #[arg(long = "flag")]
        flags: Vec<DispatchFlag>,
    },
    /// Dispatch routes read line by line from stdin, reloading the table on change
    Watch,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", s))
}

fn print_presentation(p: &Presentation<'_, String>) {
    let line = serde_json::json!({
        "route": p.route,
        "kind": p.kind,
        "target": p.binding,
        "arguments": p.arguments,
        "query_params": p.query_params,
        "flags": p.flags,
    });
    println!("{}", line);
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init_logging(&config.observability);
    let metrics_handle = if cli.metrics || config.observability.metrics_enabled {
        metrics::init_metrics()
    } else {
        None
    };

    tracing::info!(config = ?cli.config, routes = config.routes.len(), "Route table loaded");
    let mut dispatcher = lifecycle::build_dispatcher(&config)?;

    let code = match cli.command {
        Commands::Resolve { route } => match dispatcher.resolve(&route)? {
            Some(resolved) => {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("No route matches {}", route);
                ExitCode::FAILURE
            }
        },
        Commands::Check { route } => {
            if dispatcher.is_valid_route(&route) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Routes => {
            for kind in RouteKind::PRECEDENCE {
                let mut entries: Vec<_> = dispatcher.registry().entries(kind).collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                for (pattern, entry) in entries {
                    println!("{:<9} {} -> {}", kind, pattern, entry.binding);
                }
            }
            ExitCode::SUCCESS
        }
        Commands::Dispatch { route, args, flags } => {
            dispatcher.set_presenter(print_presentation);
            let flags: DispatchFlags = flags.into_iter().collect();
            let outcome = dispatcher.dispatch(&route, args.into_iter().collect(), &flags)?;
            tracing::debug!(?outcome, "Dispatch finished");
            ExitCode::SUCCESS
        }
        Commands::Watch => {
            dispatcher.set_presenter(TracingPresenter);
            watch(cli.config, dispatcher).await?;
            ExitCode::SUCCESS
        }
    };

    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }
    Ok(code)
}

async fn watch(
    config_path: PathBuf,
    dispatcher: uri_router::Dispatcher<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let shared = lifecycle::install_global(dispatcher)?.clone();
    let shutdown = Arc::new(Shutdown::new());

    let (watcher, updates) = ConfigWatcher::new(&config_path);
    let _watcher = watcher.run()?;
    let reloader = tokio::spawn(reload::run_reload_loop(shared.clone(), updates, shutdown.subscribe()));

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move { signals::shutdown_on_ctrl_c(&signal_shutdown).await });

    let mut stop = shutdown.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let flags = DispatchFlags::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let route = line.trim();
                if route.is_empty() {
                    continue;
                }

                let result = shared
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .dispatch(route, HashMap::new(), &flags);
                match result {
                    Ok(outcome) => println!("{} {:?}", route, outcome),
                    Err(e) => eprintln!("{}: {}", route, e),
                }
            }
            _ = stop.recv() => break,
        }
    }

    shutdown.trigger();
    reloader.await?;
    Ok(())
}
