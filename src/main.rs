//! transfer-router CLI
//!
//! Find the cheapest route for an interbank transfer from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Cheapest route using Banks.csv, Commissions.csv and Borders.csv in the current directory
//! transfer-router route --from Alfa --to Halyk --amount 150000
//!
//! # Every feasible candidate, as JSON
//! transfer-router route --from Alfa --to Halyk --amount 150000 --all --format json
//!
//! # Show the loaded institutions
//! transfer-router list --banks data/Banks.csv --commissions data/Commissions.csv --borders data/Borders.csv
//!
//! # Write a random catalog for testing
//! transfer-router generate --institutions 20 --countries RU,KZ,BY --output-dir data
//! ```
//!
//! Set `RUST_LOG=debug` to trace candidate and split decisions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;
use std::process;
use thiserror::Error;
use transfer_router::core::catalog::{Catalog, CatalogError};
use transfer_router::core::institution::CountryCode;
use transfer_router::io::csv_catalog::{load_catalog, write_catalog, CatalogFiles, LoadError};
use transfer_router::optimization::route_optimizer::{
    RouteOption, RouteOptimizer, RoutingError, TransferRequest,
};
use transfer_router::simulation::catalog_generator::{generate_random_catalog, CatalogConfig};

#[derive(Parser)]
#[command(
    name = "transfer-router",
    version,
    about = "Cheapest route and split for interbank transfers"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the cheapest route for a transfer
    Route {
        #[command(flatten)]
        data: DataArgs,
        /// Sending institution
        #[arg(long)]
        from: String,
        /// Receiving institution
        #[arg(long)]
        to: String,
        /// Amount to transfer
        #[arg(long)]
        amount: Decimal,
        /// Also print every feasible candidate
        #[arg(long)]
        all: bool,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List the institutions in a catalog
    List {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Generate a random catalog as three CSV files
    Generate {
        /// Number of institutions
        #[arg(long, default_value_t = 10)]
        institutions: usize,
        /// Comma-separated country codes
        #[arg(long, value_delimiter = ',', default_value = "RU,KZ,BY")]
        countries: Vec<String>,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Directory to write Banks.csv, Commissions.csv and Borders.csv into
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
}

#[derive(Args)]
struct DataArgs {
    /// Institutions file
    #[arg(long, default_value = "Banks.csv")]
    banks: PathBuf,
    /// Commission tiers file
    #[arg(long, default_value = "Commissions.csv")]
    commissions: PathBuf,
    /// Border fees file
    #[arg(long, default_value = "Borders.csv")]
    borders: PathBuf,
}

impl DataArgs {
    fn load(&self) -> Result<Catalog, CliError> {
        let files = CatalogFiles {
            banks: self.banks.clone(),
            commissions: self.commissions.clone(),
            borders: self.borders.clone(),
        };
        Ok(load_catalog(&files)?)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Routing(#[from] RoutingError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("cannot create {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON output schema for the route command.
#[derive(serde::Serialize)]
struct RouteOutput<'a> {
    request: &'a TransferRequest,
    best: &'a RouteOption,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidates: Option<&'a [RouteOption]>,
}

/// JSON output schema for the list command.
#[derive(serde::Serialize)]
struct InstitutionOutput {
    name: String,
    country: String,
    correspondents: Vec<String>,
}

fn cmd_route(
    data: &DataArgs,
    request: TransferRequest,
    all: bool,
    format: Format,
) -> Result<(), CliError> {
    let catalog = data.load()?;
    let optimizer = RouteOptimizer::new(&catalog);
    let priced = optimizer.candidates(&request)?;
    let best = RouteOptimizer::select_best(&request, &priced);
    let candidates = all.then_some(priced);

    match format {
        Format::Json => {
            let output = RouteOutput {
                request: &request,
                best: &best,
                candidates: candidates.as_deref(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Text => {
            println!(
                "Transfer {} from {} to {}\n",
                request.amount, request.source, request.destination
            );
            println!("{}", best);
            if let Some(candidates) = candidates {
                println!("\nCandidates:");
                for (i, candidate) in candidates.iter().enumerate() {
                    let names: Vec<&str> = candidate.path.iter().map(|p| p.as_str()).collect();
                    let commission = candidate
                        .total_commission
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "unbounded".to_string());
                    println!(
                        "  {:>2}. {:<40} {:>14}  parts {:?}",
                        i + 1,
                        names.join(" -> "),
                        commission,
                        candidate.leg_splits
                    );
                }
            }
        }
    }
    Ok(())
}

fn cmd_list(data: &DataArgs, format: Format) -> Result<(), CliError> {
    let catalog = data.load()?;
    match format {
        Format::Json => {
            let output: Vec<InstitutionOutput> = catalog
                .institutions()
                .map(|i| InstitutionOutput {
                    name: i.id().to_string(),
                    country: i.country().to_string(),
                    correspondents: i.correspondents().iter().map(|c| c.to_string()).collect(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Text => {
            println!("Loaded institutions:");
            for institution in catalog.institutions() {
                println!("- {}", institution);
            }
        }
    }
    Ok(())
}

fn cmd_generate(
    institutions: usize,
    countries: Vec<String>,
    seed: Option<u64>,
    output_dir: PathBuf,
) -> Result<(), CliError> {
    let config = CatalogConfig {
        institution_count: institutions,
        countries: countries
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(CountryCode::new)
            .collect(),
        seed,
        ..Default::default()
    };
    let catalog = generate_random_catalog(&config)?;

    fs::create_dir_all(&output_dir).map_err(|source| CliError::OutputDir {
        path: output_dir.clone(),
        source,
    })?;
    let files = CatalogFiles::in_dir(&output_dir);
    write_catalog(&catalog, &files)?;
    eprintln!(
        "Generated {} institutions and {} border fees → {}",
        catalog.institution_count(),
        catalog.border_fees().len(),
        output_dir.display()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Route {
            data,
            from,
            to,
            amount,
            all,
            format,
        } => cmd_route(&data, TransferRequest::new(from.as_str(), to.as_str(), amount), all, format),
        Command::List { data, format } => cmd_list(&data, format),
        Command::Generate {
            institutions,
            countries,
            seed,
            output_dir,
        } => cmd_generate(institutions, countries, seed, output_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
