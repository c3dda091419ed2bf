//! naive-pi CLI
//!
//! Runs the Monte Carlo, Leibniz and Buffon's needle estimators in turn and
//! prints how close each one gets to pi.

use clap::{Args, CommandFactory, Parser as ClapParser, Subcommand};
use clap_complete::{Shell, generate};
use naive_pi::config::{PartialBuffon, PartialLeibniz, PartialMonteCarlo, PartialOutput};
use naive_pi::{Config, OutputFormat, PartialConfig};
use naive_pi_core::Method;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "naive-pi")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Approximate pi with Monte Carlo, Leibniz and Buffon's needle", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct RunArgs {
    /// TOML file with settings to override the built-in defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Method to run (repeatable; defaults to all three)
    #[arg(short, long = "method", value_name = "NAME", value_parser = parse_method)]
    methods: Vec<Method>,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Random points for the Monte Carlo method
    #[arg(long, value_name = "N")]
    monte_carlo_iterations: Option<u64>,

    /// Series terms for the Leibniz method
    #[arg(long, value_name = "N")]
    leibniz_terms: Option<u64>,

    /// Fractional digits kept by the Leibniz decimal accumulator (20-28)
    #[arg(long, value_name = "DIGITS")]
    precision: Option<u32>,

    /// Needle drops for Buffon's needle
    #[arg(long, value_name = "N")]
    buffon_drops: Option<u64>,

    /// Needle length for Buffon's needle
    #[arg(long, value_name = "L")]
    needle_length: Option<f64>,

    /// Distance between lines for Buffon's needle
    #[arg(long, value_name = "D")]
    line_spacing: Option<f64>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Do not highlight digits that differ from pi
    #[arg(long)]
    no_color: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl RunArgs {
    fn overrides(&self) -> PartialConfig {
        PartialConfig {
            seed: self.seed,
            methods: (!self.methods.is_empty()).then(|| self.methods.clone()),
            monte_carlo: PartialMonteCarlo {
                iterations: self.monte_carlo_iterations,
            },
            leibniz: PartialLeibniz {
                terms: self.leibniz_terms,
                precision: self.precision,
            },
            buffon: PartialBuffon {
                drops: self.buffon_drops,
                needle_length: self.needle_length,
                line_spacing: self.line_spacing,
            },
            output: PartialOutput {
                format: self.format,
                color: self.no_color.then_some(false),
            },
        }
    }
}

fn parse_method(s: &str) -> Result<Method, String> {
    s.parse()
}

fn main() {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        run_completions(shell);
        return;
    }

    init_logging(cli.run.verbose);
    run_estimates(&cli.run);
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "naive_pi=info,naive_pi_core=info"
    } else {
        "naive_pi=warn,naive_pi_core=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "naive-pi", &mut io::stdout());
}

fn run_estimates(args: &RunArgs) {
    let config = match Config::load(args.config.as_deref(), args.overrides()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let color = naive_pi::color_enabled(&config);
    let stdout = io::stdout();
    if let Err(e) = naive_pi::run(&config, color, &mut stdout.lock()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
