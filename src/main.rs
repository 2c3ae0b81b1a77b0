//! decksynergy CLI
//!
//! Usage:
//!   decksynergy --deck deck.json                 # Text summary
//!   decksynergy --deck deck.json --json          # JSON envelope
//!   decksynergy --deck deck.json --catalog c.json
//!   decksynergy --list-packages                  # Show the catalog
//!   decksynergy --serve                          # HTTP API server

use clap::Parser;
use colored::Colorize;
use std::sync::Arc;
use tracing::debug;

use decksynergy::config::{init_tracing, EngineConfig};
use decksynergy::core::{render_summary, run_server, AnalysisEnvelope, SummaryOptions, SynergyEngine};
use decksynergy::error::read_json_file;
use decksynergy::types::{DeckInput, PackageCatalog};
use decksynergy::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "decksynergy",
    version = VERSION,
    about = "Detect strategy packages in a card deck and score their synergy",
    long_about = "decksynergy classifies every card into strategic tags, scores each\n\
                  strategy package by how well the deck covers its components, and\n\
                  reports the primary strategies, the best cards for each, and any\n\
                  conflicts or payoff/enabler imbalances.\n\n\
                  Strength bands:\n  \
                  STRONG    - score >= 75\n  \
                  MODERATE  - score >= 50\n  \
                  WEAK      - score >= 25\n  \
                  ABSENT    - below 25"
)]
struct Args {
    /// Deck file: {"cards": [...], "quantities": {"name": n}}
    #[arg(short, long, required_unless_present_any = ["list_packages", "serve"])]
    deck: Option<String>,

    /// Custom package catalog (JSON array of packages)
    #[arg(short, long)]
    catalog: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Show per-card signals and debug logs
    #[arg(short, long)]
    verbose: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Maximum number of primary packages
    #[arg(long)]
    top_n: Option<usize>,

    /// Minimum score for a primary package
    #[arg(long)]
    min_score: Option<f64>,

    /// Print the active package catalog and exit
    #[arg(long)]
    list_packages: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(if args.verbose { "debug" } else { "warn" });

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = EngineConfig::from_env()?;
    if let Some(top_n) = args.top_n {
        config.top_n = top_n;
    }
    if let Some(min_score) = args.min_score {
        config.min_primary_score = min_score;
    }
    config.validate()?;
    debug!(?config, "engine config");

    let catalog = match &args.catalog {
        Some(path) => PackageCatalog::from_json_file(path)?,
        None => PackageCatalog::builtin(),
    };
    let engine = SynergyEngine::new(catalog, config);

    if args.list_packages {
        print_packages(engine.catalog(), args.no_color);
        return Ok(());
    }

    if args.serve {
        return run_server(&args.addr, Arc::new(engine)).await;
    }

    let Some(path) = args.deck.as_deref() else {
        return Err("no deck given (use --deck)".into());
    };
    let deck: DeckInput = read_json_file(path)?;
    let report = engine.analyze(&deck.cards, &deck.quantities);

    if args.json {
        let envelope = AnalysisEnvelope::new(&deck.cards, &deck.quantities, report);
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        let options = SummaryOptions {
            verbose: args.verbose,
            no_color: args.no_color,
        };
        print!("{}", render_summary(&report, options));
    }

    Ok(())
}

/// Print every package with its components
fn print_packages(catalog: &PackageCatalog, no_color: bool) {
    for pkg in catalog.packages() {
        let header = format!("{} ({})", pkg.display_name, pkg.name);
        if no_color {
            println!("{}", header);
        } else {
            println!("{}", header.bold());
        }
        println!("  {}", pkg.description);

        for c in &pkg.components {
            println!(
                "  - {}: {} (min {}, weight {})",
                c.display_name,
                c.tags.join(", "),
                c.min_required,
                c.weight
            );
        }

        if !pkg.conflict_tags.is_empty() {
            let tags: Vec<&str> = pkg.conflict_tags.iter().map(String::as_str).collect();
            println!("  conflicts: {}", tags.join(", "));
        }
        println!();
    }
}
