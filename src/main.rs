//! bork - classify command-line arguments.

use anyhow::{Context, Result};
use bork::{classify_args, render, write_temp_file, Config, Format};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// Classify arguments into long options, short options and positionals.
#[derive(Parser, Debug)]
#[command(name = "bork", version, about, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify arguments and print the result
    Scan {
        /// JSON option table
        #[arg(long, default_value = "{}")]
        config: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Write the result to a temporary file and print its path
        #[arg(long)]
        to_file: bool,

        /// Arguments to classify
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Validate a JSON option table
    Check {
        /// JSON option table
        #[arg(long)]
        config: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            config,
            format,
            to_file,
            args,
        } => {
            tracing::debug!(count = args.len(), "executing scan command");
            let cfg = load_config(&config)?;

            let tokens = classify_args(&cfg, &args).context("failed to classify arguments")?;
            let rendered = render(&tokens, format).context("failed to render output")?;

            if to_file {
                let path = write_temp_file(&rendered).context("failed to write output file")?;
                println!("{}", path.display());
            } else {
                print!("{}", rendered);
            }
        }
        Commands::Check { config } => {
            tracing::debug!("executing check command");
            load_config(&config)?;
            println!("ok");
        }
    }

    Ok(())
}

fn load_config(json: &str) -> Result<Config> {
    let cfg = Config::from_json(json).context("failed to parse config JSON")?;
    cfg.validate().context("invalid config")?;
    Ok(cfg)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
