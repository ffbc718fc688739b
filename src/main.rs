//! Holded Export CLI
//!
//! Reads the billing platform's customers, invoices and transactions exports
//! and writes the accounting import CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --on-error skip --output output/holded_invoices.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity (default `info`)

use clap::Parser;
use holded_export::{ErrorPolicy, ExportConfig, ExportEngine, MappingSettings, Result};
use log::{info, warn};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "holded-export", version, about = "Map billing exports to accounting import CSV")]
struct Cli {
    /// Customers export
    #[arg(long, default_value = "input/customers.csv")]
    customers: PathBuf,

    /// Invoices export
    #[arg(long, default_value = "input/invoices.csv")]
    invoices: PathBuf,

    /// Balance transactions export
    #[arg(long, default_value = "input/transactions.csv")]
    transactions: PathBuf,

    /// Import file to write
    #[arg(short, long, default_value = "output/holded_invoices.csv")]
    output: PathBuf,

    /// What to do with invoices that cannot be mapped
    #[arg(long, value_enum, default_value_t = ErrorPolicy::Abort)]
    on_error: ErrorPolicy,

    /// Product description stamped on every row
    #[arg(long)]
    product_description: Option<String>,

    /// Revenue account code
    #[arg(long)]
    sales_account: Option<String>,

    /// Treasury account code
    #[arg(long)]
    charge_account: Option<String>,
}

impl Cli {
    fn into_parts(self) -> (ExportConfig, MappingSettings) {
        let config = ExportConfig {
            customers_path: self.customers,
            invoices_path: self.invoices,
            transactions_path: self.transactions,
            output_path: self.output,
        };

        let defaults = MappingSettings::default();
        let settings = MappingSettings {
            policy: self.on_error,
            product_description: self.product_description.unwrap_or(defaults.product_description),
            sales_account: self.sales_account.unwrap_or(defaults.sales_account),
            charge_account: self.charge_account.unwrap_or(defaults.charge_account),
        };

        (config, settings)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (config, settings) = cli.into_parts();

    info!("Reading files...");
    let mut engine = ExportEngine::new(settings);
    engine.load_files(&config)?;

    info!("Mapping invoices...");
    let report = engine.map_invoices()?;
    for diagnostic in report.diagnostics.entries() {
        warn!("{}", diagnostic);
    }

    info!("Exporting CSV...");
    engine.write_file(&report, &config)?;

    Ok(())
}
