use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::application::LedgerService;
use crate::domain::format_cents;

/// Tally - in-memory transfer ledger
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Record transfers between parties and move them in and out as CSV or JSON")]
#[command(version)]
pub struct Cli {
    /// Ledger state file (JSON)
    #[arg(short, long, default_value = "tally.json")]
    pub ledger: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty ledger file
    Init,

    /// Register a transfer between two parties
    Register {
        /// Amount in the smallest currency unit (e.g. cents); may be zero or negative
        #[arg(allow_negative_numbers = true)]
        amount: i64,

        /// Source party
        #[arg(long)]
        from: String,

        /// Destination party
        #[arg(long)]
        to: String,
    },

    /// List transactions in insertion order
    List {
        /// Show only the last N transactions
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Export the ledger as CSV or JSON
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import CSV or JSON transactions, appending them to the ledger
    Import {
        /// Input format
        #[arg(short, long, value_enum, default_value_t = Format::Csv)]
        format: Format,

        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Json,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match &self.command {
            Commands::Init => {
                self.init().await?;
            }

            Commands::Register { amount, from, to } => {
                let service = self.load().await?;
                let id = service.register(from, to, *amount).await?;
                self.save(&service).await?;
                println!(
                    "Registered transaction: {} {} -> {} ({})",
                    format_cents(*amount),
                    from,
                    to,
                    id
                );
            }

            Commands::List { limit } => {
                let service = self.load().await?;
                run_list_command(&service, *limit).await;
            }

            Commands::Export { format, output } => {
                let service = self.load().await?;
                run_export_command(&service, *format, output.as_deref(), self.verbose).await?;
            }

            Commands::Import { format, input } => {
                let service = self.load().await?;
                let before = service.len().await;
                let result = run_import_command(&service, *format, input.as_deref()).await;
                let after = service.len().await;

                // Rows appended before a failed CSV row stay in the ledger.
                if after != before {
                    self.save(&service).await?;
                }

                let imported = result?;
                println!("Import complete");
                println!("  Imported: {}", imported);
                println!("  Total:    {}", after);
            }
        }

        Ok(())
    }

    async fn init(&self) -> Result<()> {
        if Path::new(&self.ledger).exists() {
            anyhow::bail!("Ledger already exists: {}", self.ledger);
        }
        self.save(&LedgerService::new()).await?;
        println!("Ledger initialized: {}", self.ledger);
        Ok(())
    }

    async fn load(&self) -> Result<LedgerService> {
        if !Path::new(&self.ledger).exists() {
            anyhow::bail!(
                "Ledger not found: {}. Run `tally init` first",
                self.ledger
            );
        }

        let service = LedgerService::new();
        let count = service
            .restore_json(&self.ledger)
            .await
            .with_context(|| format!("Failed to load ledger: {}", self.ledger))?;

        if self.verbose {
            eprintln!("[Ledger] Loaded {} transaction(s) from {}", count, self.ledger);
        }
        Ok(service)
    }

    async fn save(&self, service: &LedgerService) -> Result<()> {
        let count = service
            .export_json_file(&self.ledger)
            .await
            .with_context(|| format!("Failed to save ledger: {}", self.ledger))?;

        if self.verbose {
            eprintln!("[Ledger] Saved {} transaction(s) to {}", count, self.ledger);
        }
        Ok(())
    }
}

async fn run_list_command(service: &LedgerService, limit: Option<usize>) {
    let transactions = service.transactions().await;

    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    let skip = limit
        .map(|n| transactions.len().saturating_sub(n))
        .unwrap_or(0);

    println!(
        "{:<20} {:>12} {:<15} {:<15} ID",
        "CREATED", "AMOUNT", "FROM", "TO"
    );
    println!("{}", "-".repeat(100));

    for tx in transactions.iter().skip(skip) {
        let created = tx
            .created_at()
            .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| tx.created.to_string());

        println!(
            "{:<20} {:>12} {:<15} {:<15} {}",
            created,
            format_cents(tx.amount),
            truncate(&tx.from, 15),
            truncate(&tx.to, 15),
            tx.id
        );
    }
}

async fn run_export_command(
    service: &LedgerService,
    format: Format,
    output: Option<&str>,
    verbose: bool,
) -> Result<()> {
    use std::io::{Write, stdout};

    let count = match (format, output) {
        (Format::Csv, Some(path)) => service
            .export_csv_file(path)
            .await
            .with_context(|| format!("Failed to write output file: {}", path))?,
        (Format::Json, Some(path)) => service
            .export_json_file(path)
            .await
            .with_context(|| format!("Failed to write output file: {}", path))?,
        (Format::Csv, None) => service.export_csv(stdout().lock()).await?,
        (Format::Json, None) => {
            let data = service.export_json().await?;
            let mut out = stdout().lock();
            out.write_all(&data)?;
            out.write_all(b"\n")?;
            out.flush()?;
            service.len().await
        }
    };

    if verbose || output.is_some() {
        eprintln!("Exported {} transaction(s)", count);
    }

    Ok(())
}

async fn run_import_command(
    service: &LedgerService,
    format: Format,
    input: Option<&str>,
) -> Result<usize> {
    use std::io::stdin;

    let imported = match (format, input) {
        (Format::Csv, Some(path)) => service
            .import_csv(path)
            .await
            .with_context(|| format!("Failed to import CSV file: {}", path))?,
        (Format::Json, Some(path)) => service
            .import_json(path)
            .await
            .with_context(|| format!("Failed to import JSON file: {}", path))?,
        (Format::Csv, None) => service
            .import_csv_reader(stdin().lock())
            .await
            .context("Failed to import CSV from stdin")?,
        (Format::Json, None) => service
            .import_json_reader(stdin().lock())
            .await
            .context("Failed to import JSON from stdin")?,
    };

    Ok(imported)
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
