use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use csvbench::bench::SuiteRunner;
use csvbench::config::BenchConfig;
use csvbench::engine::{CsvEngine, RustCsvEngine};
use csvbench::export::CompositeExporter;
use csvbench::fixtures::{self, standard_fixtures};
use csvbench::{CsvBenchError, Result};

#[derive(Parser, Debug)]
#[command(name = "csvbench", version, about = "CSV parsing benchmark harness")]
struct Cli {
    /// Directory containing the fixture files
    #[arg(long, value_name = "DIR")]
    fixture_dir: Option<PathBuf>,

    /// Directory the result exports are written into
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Override the default iteration count
    #[arg(long, value_name = "N")]
    iterations: Option<u32>,

    /// Disable the asynchronous method variants
    #[arg(long)]
    no_async: bool,

    /// Generate any missing standard fixture before running
    #[arg(long)]
    generate_fixtures: bool,

    /// Generate the extreme fixture with this many rows before running
    #[arg(long, value_name = "ROWS")]
    generate_extreme: Option<usize>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    info!("Starting csvbench v{}", env!("CARGO_PKG_VERSION"));

    match execute(cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Benchmark run failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn execute(cli: Cli) -> Result<()> {
    let mut config = BenchConfig::load()?;
    if let Some(dir) = cli.fixture_dir {
        config.fixture_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(iterations) = cli.iterations {
        config.default_iterations = iterations;
    }
    if cli.no_async {
        config.enable_async = false;
    }
    config.validate()?;

    if cli.generate_fixtures {
        let generated = fixtures::ensure_standard_fixtures(&config.fixture_dir)?;
        for name in &generated {
            info!(file = %name, "generated fixture");
        }
    }
    if let Some(rows) = cli.generate_extreme {
        fixtures::generate_extreme(&config.fixture_dir, &config.extreme_fixture, rows)?;
        info!(file = %config.extreme_fixture, rows, "generated extreme fixture");
    }

    let engine: Arc<dyn CsvEngine> = Arc::new(RustCsvEngine::new());
    let exporter = CompositeExporter::standard();
    let runner = SuiteRunner::new(&config, engine, &exporter);
    let set = runner.run(&standard_fixtures()).await?;

    println!(
        "Exported {} results to {}",
        set.len(),
        config.output_dir.display()
    );
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = if cli.verbose > 0 {
        let level = match cli.verbose {
            1 => Level::DEBUG,
            _ => Level::TRACE,
        };
        EnvFilter::new(format!("csvbench={}", level))
    } else if cli.quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("csvbench=info"))
    };

    let subscriber = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CsvBenchError::ConfigError(format!("Failed to initialize logging: {}", e)))
}
