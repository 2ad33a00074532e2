mod commands;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use corpus_trends::config::Config;
use corpus_trends::storage::YearRange;

#[derive(Parser)]
#[command(
    name = "corpus-trends",
    version,
    about = "Monthly term frequency trends over dated document corpora",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the config file
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML config file; environment variables are used when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Corpus selection shared by all commands
#[derive(Args)]
struct CorpusArgs {
    /// JSON Lines corpus file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// First publication year to include
    #[arg(long)]
    from_year: Option<i32>,

    /// Last publication year to include
    #[arg(long)]
    to_year: Option<i32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chart term counts or proportions by month
    Terms {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Comma-separated terms; use '|' inside a term to combine alternatives
        #[arg(short, long)]
        terms: Option<String>,

        /// Chart raw counts instead of proportions of words
        #[arg(long, default_value = "false")]
        raw: bool,

        /// Company to include in an extra proportion chart (repeatable)
        #[arg(short, long = "company")]
        companies: Vec<String>,

        /// Write figures as JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the aggregated tables
        #[arg(long, default_value = "false")]
        show_table: bool,
    },

    /// Chart document counts by month
    Posts {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// One line per company
        #[arg(long, default_value = "false")]
        by_company: bool,

        /// Write figures as JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the aggregated table
        #[arg(long, default_value = "false")]
        show_table: bool,
    },

    /// List the companies present in the corpus
    Companies {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate().context("Invalid configuration")?;

    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    tracing::info!("corpus-trends starting");

    match cli.command {
        Commands::Terms {
            corpus,
            terms,
            raw,
            companies,
            output,
            show_table,
        } => {
            let corpus = corpus_params(corpus, &config)?;
            let expression = terms.unwrap_or_else(|| config.terms.default_expression.clone());
            // --raw forces raw counts; otherwise the configured default applies
            let raw = raw || !config.terms.proportion;
            tracing::info!(
                input = %corpus.input.display(),
                terms = %expression,
                raw = %raw,
                companies = ?companies,
                "Starting terms command"
            );
            commands::terms(commands::TermsParams {
                corpus,
                expression,
                raw,
                companies,
                output,
                show_table,
            })?;
        }

        Commands::Posts {
            corpus,
            by_company,
            output,
            show_table,
        } => {
            let corpus = corpus_params(corpus, &config)?;
            tracing::info!(
                input = %corpus.input.display(),
                by_company = %by_company,
                "Starting posts command"
            );
            commands::posts(commands::PostsParams {
                corpus,
                by_company,
                output,
                show_table,
            })?;
        }

        Commands::Companies { corpus } => {
            let corpus = corpus_params(corpus, &config)?;
            tracing::info!(input = %corpus.input.display(), "Starting companies command");
            commands::companies(&corpus)?;
        }
    }

    tracing::info!("corpus-trends completed successfully");
    Ok(())
}

fn corpus_params(args: CorpusArgs, config: &Config) -> Result<commands::CorpusParams> {
    let years = YearRange::new(
        args.from_year.or(config.corpus.from_year),
        args.to_year.or(config.corpus.to_year),
    )
    .context("Invalid year range")?;

    Ok(commands::CorpusParams {
        input: args.input.unwrap_or_else(|| config.corpus.path.clone()),
        years,
    })
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("corpus_trends=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("corpus_trends={level},warn"))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    Ok(())
}
