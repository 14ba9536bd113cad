//! # Price Quote Tool
//!
//! Prints the current price of products from a catalog.
//!
//! ## Usage
//! ```bash
//! # Quote two SKUs from the default catalog
//! cargo run -p tally-catalog --bin quote -- test mug
//!
//! # Specify catalog path
//! cargo run -p tally-catalog --bin quote -- --catalog ./demos/catalog.toml test
//!
//! # One JSON summary per line
//! cargo run -p tally-catalog --bin quote -- --json test
//! ```
//!
//! Logging follows `RUST_LOG` (default `info`), written to stderr.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use tally_catalog::{CatalogResult, ProductRegistry};
use tracing::error;
use tracing_subscriber::EnvFilter;

struct Options {
    catalog: Option<PathBuf>,
    json: bool,
    skus: Vec<String>,
}

fn main() -> ExitCode {
    init_tracing();

    let options = match parse_args(env::args().skip(1).collect()) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("quote: {} (see --help)", message);
            return ExitCode::FAILURE;
        }
    };

    if options.skus.is_empty() {
        eprintln!("quote: no SKUs given (see --help)");
        return ExitCode::FAILURE;
    }

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Quote failed");
            eprintln!("quote: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> CatalogResult<()> {
    let registry = ProductRegistry::load(options.catalog.clone())?;

    for sku in &options.skus {
        let product = registry.get(sku)?;

        if options.json {
            let line = serde_json::to_string(&product.summary())?;
            println!("{}", line);
            continue;
        }

        println!("{} ({})", product.name(), product.sku());
        println!("  Original price: {}", product.original_price());
        println!("  Current price:  {}", product.current_price());
        if product.has_discount() {
            println!(
                "  Discount:       {} ({} off)",
                product.discount_percentage(),
                product.discount_dollars()
            );
        }
    }

    Ok(())
}

/// Returns `Ok(None)` when help was requested.
fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut options = Options {
        catalog: None,
        json: false,
        skus: Vec::new(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            flag @ ("--catalog" | "-c") => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{} requires a path", flag))?;
                options.catalog = Some(PathBuf::from(path));
                i += 1;
            }
            "--json" | "-j" => options.json = true,
            "--help" | "-h" => return Ok(None),
            sku => options.skus.push(sku.to_string()),
        }
        i += 1;
    }

    Ok(Some(options))
}

fn print_help() {
    println!("Tally Price Quote");
    println!();
    println!("Usage: quote [OPTIONS] <SKU>...");
    println!();
    println!("Options:");
    println!("  -c, --catalog <PATH>  Catalog file (default: $TALLY_CATALOG or config dir)");
    println!("  -j, --json            Print one JSON summary per line");
    println!("  -h, --help            Show this help message");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show cache hits and sale matches
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
