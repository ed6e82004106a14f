use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use koran_ingest::{Extraction, StatementExtractor};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod output;

use config::{Config, OutputFormat};
use input::InputKind;

#[derive(Parser, Debug)]
#[command(name = "koran", version, about = "Bank statement (rekening koran) transaction extractor")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract transactions from one or more page dumps (.json fragments or plain text)
    Extract {
        /// Input files, one statement each
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output format (default from config, else csv)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Config file (default: ~/.koran/config.toml if present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config to ~/.koran/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective config
    Show {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Extract {
            inputs,
            format,
            output,
            config,
        } => {
            let cfg = config::load_config(config.as_deref())?;
            run_extract(&cfg, &inputs, format, output)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init { force } => {
                let path = config::default_config_path()?;
                if config::init_config(&path, force)? {
                    println!("Wrote {}", path.display());
                } else {
                    println!("{} already exists (use --force to overwrite)", path.display());
                }
            }
            ConfigCommand::Show { config } => {
                let cfg = config::load_config(config.as_deref())?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_extract(
    cfg: &Config,
    inputs: &[PathBuf],
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let extractor = StatementExtractor::new(cfg.extract.clone())?;
    // Text dumps have no fragments, so plain text is the only source of lines.
    let text_extractor = StatementExtractor::new(koran_core::ExtractConfig {
        plain_text_fallback: true,
        ..cfg.extract.clone()
    })?;

    let mut extractions: Vec<Extraction> = Vec::with_capacity(inputs.len());
    for path in inputs {
        if !path.exists() {
            bail!("input not found: {}", path.display());
        }
        let (doc, kind) = input::read_document(path)?;
        let ex = match kind {
            InputKind::Fragments => extractor.extract_document(&doc),
            InputKind::PlainText => text_extractor.extract_document(&doc),
        };
        eprintln!(
            "Parsed {} transactions from {} ({} pages)",
            ex.records.len(),
            path.display(),
            ex.diagnostics.pages
        );
        if ex.diagnostics.has_losses() {
            eprintln!(
                "  dropped: {} incomplete blocks, {} orphan amount lines, {} unparsable amounts",
                ex.diagnostics.incomplete_blocks,
                ex.diagnostics.orphan_amount_lines,
                ex.diagnostics.unparsable_amounts
            );
        }
        extractions.push(ex);
    }

    let out: Box<dyn Write> = match &output {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("create {}", p.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match format.unwrap_or(cfg.output.format) {
        OutputFormat::Csv => {
            let locale = cfg.extract.numeric_locale;
            let display = cfg.output.display_amounts.then_some(&locale);
            output::write_csv(out, &extractions, display)?;
        }
        OutputFormat::Json => output::write_json(out, &extractions)?,
    }

    Ok(())
}
