// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! clinvar-batch CLI
//!
//! Command-line interface for batch ClinVar variant annotation.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use clinvar_batch::config::{DEFAULT_RATE_LIMIT_MS, DEFAULT_TIMEOUT_SECS};
use clinvar_batch::input::{DEFAULT_GENE_COLUMN, DEFAULT_VARIANT_COLUMN};
use clinvar_batch::{
    read_queries, write_results, BatchProcessor, ClientConfig, ClinVarError, EutilsClient,
    LookupStatus, VariantLookup, VariantQuery, VariantResult,
};

#[derive(Parser)]
#[command(name = "clinvar-batch")]
#[command(author, version, about = "ClinVar variant annotation via NCBI E-utilities")]
#[command(
    long_about = "Query ClinVar for variant pathogenicity annotations.

Examples:
  clinvar-batch batch -i variants.csv -o annotated.csv
  clinvar-batch batch -i variants.tsv -o annotated.csv --gene-column Symbol --overwrite
  clinvar-batch single CHD8 p.Arg1580Trp
  clinvar-batch single CHD8 p.Arg1580Trp --format json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate a file of gene/variant pairs
    Batch {
        /// Input file (CSV, or TSV for .tsv/.txt extensions) with a header row
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (created; not replaced without --overwrite)
        #[arg(short, long)]
        output: PathBuf,

        /// Name of the gene column
        #[arg(long, default_value = DEFAULT_GENE_COLUMN)]
        gene_column: String,

        /// Name of the variant column
        #[arg(long, default_value = DEFAULT_VARIANT_COLUMN)]
        variant_column: String,

        /// Replace the output file if it already exists
        #[arg(long)]
        overwrite: bool,

        /// Delay between requests in milliseconds
        #[arg(long, default_value_t = DEFAULT_RATE_LIMIT_MS)]
        rate_limit_ms: u64,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },

    /// Look up a single gene/variant pair
    Single {
        /// Gene symbol (e.g., CHD8)
        gene: String,

        /// Variant descriptor (e.g., p.Arg1580Trp)
        variant: String,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Batch {
            input,
            output,
            gene_column,
            variant_column,
            overwrite,
            rate_limit_ms,
            timeout_secs,
        } => run_batch(
            &input,
            &output,
            &gene_column,
            &variant_column,
            overwrite,
            rate_limit_ms,
            timeout_secs,
        ),
        Commands::Single {
            gene,
            variant,
            format,
            timeout_secs,
        } => run_single(&gene, &variant, &format, timeout_secs),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_batch(
    input: &PathBuf,
    output: &PathBuf,
    gene_column: &str,
    variant_column: &str,
    overwrite: bool,
    rate_limit_ms: u64,
    timeout_secs: u64,
) -> Result<(), ClinVarError> {
    // Refuse a doomed run before spending time on lookups.
    if output.exists() && !overwrite {
        return Err(ClinVarError::Io {
            msg: format!(
                "{} already exists (pass --overwrite to replace it)",
                output.display()
            ),
        });
    }

    let queries = read_queries(input, gene_column, variant_column)?;
    eprintln!("Loaded {} queries from {}", queries.len(), input.display());

    let config = ClientConfig::from_env()
        .with_rate_limit(Duration::from_millis(rate_limit_ms))
        .with_timeout(Duration::from_secs(timeout_secs));
    let client = EutilsClient::new(config)?;

    let processor = BatchProcessor::new(client);
    let outcome = processor.run_with_progress(&queries, |progress| {
        eprintln!(
            "  [{}/{}] {:.0}% ({} found, {} not found, {} errors)",
            progress.processed,
            progress.total,
            progress.percent(),
            progress.found,
            progress.not_found,
            progress.errors
        );
    });

    write_results(output, &outcome.results, overwrite)?;

    let summary = outcome.summary();
    eprintln!(
        "Wrote {} rows to {} in {:.1}s: {}",
        outcome.total(),
        output.display(),
        outcome.duration.as_secs_f64(),
        summary
    );

    Ok(())
}

fn run_single(
    gene: &str,
    variant: &str,
    format: &str,
    timeout_secs: u64,
) -> Result<(), ClinVarError> {
    let config = ClientConfig::from_env().with_timeout(Duration::from_secs(timeout_secs));
    let client = EutilsClient::new(config)?;

    let query = VariantQuery::new(gene, variant);
    let result = match client.lookup(&query) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(query = %query, error = %e, "lookup failed");
            VariantResult::error(&query, e)
        }
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result_json(&result))?),
        _ => print_text(&result),
    }

    Ok(())
}

fn print_text(result: &VariantResult) {
    if result.status != LookupStatus::Found {
        println!("Status: {}", result.status);
        println!("{}", result.note);
        return;
    }

    println!("Variation ID: {}", result.variation_id);
    println!("Accession: {}", result.accession);
    println!("Canonical SPDI: {}", result.canonical_spdi);
    println!("Gene Symbol: {}", result.gene_symbol);
    println!("Chromosome: {}", result.chromosome);
    println!("ACMG Classification: {}", result.acmg_classification);
    println!("Molecular Consequence: {}", result.molecular_consequence);
    println!("Status: {}", result.status);
}

fn result_json(result: &VariantResult) -> serde_json::Value {
    serde_json::json!({
        "variation_id": result.variation_id,
        "accession": result.accession,
        "canonical_spdi": result.canonical_spdi,
        "gene_symbol": result.gene_symbol,
        "chromosome": result.chromosome,
        "acmg_classification": result.acmg_classification,
        "molecular_consequence": result.molecular_consequence,
        "status": result.status.as_str(),
        "note": result.note,
    })
}
