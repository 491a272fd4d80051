//! `process-cid10`: regenerates the CID-10 lookup table from the SUS catalogs.
//!
//! With no arguments it reads `attached_assets/` and writes
//! `client/src/data/cid10-database.ts`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cid10_lib::catalog::CodeCatalog;
use cid10_lib::config::{TableConfig, APP_NAME, APP_VERSION};
use cid10_lib::pipeline::{build_table, preview_lines, TableError};

/// Entries echoed after a build.
const PREVIEW_ENTRIES: usize = 10;

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(about = "Build and query the CID-10 lookup table")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the catalog files
    #[arg(long, global = true)]
    input_dir: Option<PathBuf>,

    /// Categories catalog file name
    #[arg(long, global = true)]
    categories_file: Option<String>,

    /// File name prefix of subcategory catalogs
    #[arg(long, global = true)]
    subcategory_prefix: Option<String>,

    /// File name extension of subcategory catalogs
    #[arg(long, global = true)]
    subcategory_extension: Option<String>,

    /// Source encoding label (latin1, windows-1252, utf-8, ...)
    #[arg(long, global = true)]
    encoding: Option<String>,

    /// Generated table module path
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,

    /// Exported constant name
    #[arg(long, global = true)]
    const_name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the table (default)
    Build {
        /// Also write a JSON run report
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Search the generated table like the code picker does
    Search {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print `CODE - description` for each code
    Lookup {
        #[arg(required = true)]
        codes: Vec<String>,
    },
}

impl Cli {
    fn table_config(&self) -> TableConfig {
        let mut config = TableConfig::from_env();
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(name) = &self.categories_file {
            config.categories_file = name.clone();
        }
        if let Some(prefix) = &self.subcategory_prefix {
            config.subcategory_prefix = prefix.clone();
        }
        if let Some(ext) = &self.subcategory_extension {
            config.subcategory_extension = ext.clone();
        }
        if let Some(encoding) = &self.encoding {
            config.encoding = encoding.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(name) = &self.const_name {
            config.const_name = name.clone();
        }
        config
    }
}

fn main() -> ExitCode {
    cid10_lib::init_tracing();
    run(Cli::parse())
}

fn run(cli: Cli) -> ExitCode {
    let mut config = cli.table_config();

    let result = match cli.command {
        None => build(&config),
        Some(Commands::Build { report }) => {
            config.report_path = report;
            build(&config)
        }
        Some(Commands::Search { query, limit }) => {
            if let Some(limit) = limit {
                config.search_limit = limit;
            }
            search(&config, &query)
        }
        Some(Commands::Lookup { codes }) => lookup(&config, &codes),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "{} failed", APP_NAME);
            ExitCode::FAILURE
        }
    }
}

fn build(config: &TableConfig) -> Result<(), TableError> {
    tracing::info!("{} v{}", APP_NAME, APP_VERSION);
    let (entries, report) = build_table(config)?;

    println!("Processados {} códigos CID-10", report.total_entries);
    println!("Arquivo gerado: {}", config.output_path.display());
    for skipped in &report.skipped {
        println!("Ignorado: {} ({})", skipped.source, skipped.reason);
    }
    println!();
    println!("Exemplos de códigos processados:");
    for line in preview_lines(&entries, PREVIEW_ENTRIES) {
        println!("{line}");
    }
    Ok(())
}

fn search(config: &TableConfig, query: &str) -> Result<(), TableError> {
    config.validate()?;
    let catalog = CodeCatalog::load(&config.output_path)?;
    let results = catalog.search(query, config.search_limit);
    if results.is_empty() {
        println!("Nenhum código encontrado para \"{query}\"");
    }
    for entry in results {
        println!("{} ({})", entry.label(), entry.category);
    }
    Ok(())
}

fn lookup(config: &TableConfig, codes: &[String]) -> Result<(), TableError> {
    let catalog = CodeCatalog::load(&config.output_path)?;
    for code in codes {
        println!("{}", catalog.describe(code));
    }
    Ok(())
}
