//! perfgauge CLI Entry Point
//!
//! Analyzes a captured performance timeline and prints a verdict.
//!
//! # Usage
//!
//! ```bash
//! # Analyze a capture with default thresholds
//! perfgauge capture.json
//!
//! # Load thresholds from a YAML file, then override TTFB
//! perfgauge capture.json --thresholds budget.yaml --ttfb 400
//!
//! # Export the full report as JSON
//! perfgauge capture.json --json
//! perfgauge capture.json --output report.json
//!
//! # Fail CI builds on a FAIL verdict
//! perfgauge capture.json --strict
//! ```

use std::env;
use std::process::ExitCode;

use log::{info, warn};

use perfgauge::analysis::{load_thresholds, Status, Thresholds};
use perfgauge::instrumentation::load_snapshot;
use perfgauge::metrics::Sampler;
use perfgauge::report::{save_report, MetricsTable, PerformanceReport, TerminalTable};
use perfgauge::{APP_NAME, VERSION};

/// Command-line configuration parsed from arguments.
#[derive(Debug, Default)]
struct Config {
    snapshot_path: Option<String>,
    thresholds_path: Option<String>,
    load_time: Option<f64>,
    ttfb: Option<f64>,
    page_size: Option<f64>,
    json: bool,
    output_path: Option<String>,
    strict: bool,
    verbose: bool,
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME, VERSION);
    println!("Page Performance Analyzer");
    println!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: perfgauge [OPTIONS] <SNAPSHOT_FILE>");
    println!();
    println!("Arguments:");
    println!("  <SNAPSHOT_FILE>       JSON capture of the page's performance entries");
    println!();
    println!("Options:");
    println!("  --thresholds FILE     Load thresholds from a YAML file");
    println!("  --load-time MS        Load time threshold in milliseconds");
    println!("  --ttfb MS             Time-to-first-byte threshold in milliseconds");
    println!("  --page-size BYTES     Total page size threshold in bytes");
    println!("  --json                Print the full report as JSON");
    println!("  --output FILE         Write the full report as JSON to FILE");
    println!("  --strict              Exit with failure on a FAIL verdict");
    println!("  --verbose             Enable debug logging");
    println!("  --help                Show this help message");
    println!("  --version             Show version information");
    println!();
    println!("Examples:");
    println!("  perfgauge capture.json");
    println!("  perfgauge capture.json --thresholds budget.yaml --strict");
    println!("  perfgauge capture.json --load-time 2000 --output report.json");
}

/// Reads the value following an option.
fn option_value<'a>(args: &'a [String], i: &mut usize, option: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", option))
}

/// Parses a numeric option value.
fn number_value(args: &[String], i: &mut usize, option: &str) -> Result<f64, String> {
    let raw = option_value(args, i, option)?;
    raw.parse()
        .map_err(|_| format!("Invalid value for {}: {}", option, raw))
}

/// Parses command-line arguments into a Config struct.
fn parse_arguments(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();
    let mut i = 1; // Skip program name

    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--json" => config.json = true,
            "--strict" => config.strict = true,
            "--verbose" | "-v" => config.verbose = true,
            "--thresholds" => {
                config.thresholds_path = Some(option_value(args, &mut i, arg)?.to_string());
            }
            "--output" | "-o" => {
                config.output_path = Some(option_value(args, &mut i, arg)?.to_string());
            }
            "--load-time" => config.load_time = Some(number_value(args, &mut i, arg)?),
            "--ttfb" => config.ttfb = Some(number_value(args, &mut i, arg)?),
            "--page-size" => config.page_size = Some(number_value(args, &mut i, arg)?),
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                if config.snapshot_path.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                config.snapshot_path = Some(arg.clone());
            }
        }
        i += 1;
    }

    if config.snapshot_path.is_none() {
        return Err("Missing snapshot file".to_string());
    }

    Ok(config)
}

/// Resolves thresholds: file (or defaults), then command-line overrides.
fn resolve_thresholds(config: &Config) -> Result<Thresholds, Box<dyn std::error::Error>> {
    let mut thresholds = match config.thresholds_path {
        Some(ref path) => load_thresholds(path)?,
        None => Thresholds::default(),
    };

    if let Some(ms) = config.load_time {
        thresholds = thresholds.with_load_time(ms);
    }
    if let Some(ms) = config.ttfb {
        thresholds = thresholds.with_ttfb(ms);
    }
    if let Some(bytes) = config.page_size {
        thresholds = thresholds.with_page_size(bytes);
    }

    thresholds.validate()?;
    Ok(thresholds)
}

/// Main application entry point.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let config = parse_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })?;

    setup_logging(config.verbose);

    if !config.json {
        print_banner();
    }

    let snapshot_path = config.snapshot_path.clone().unwrap_or_default();
    let snapshot = load_snapshot(&snapshot_path)?;
    let thresholds = resolve_thresholds(&config)?;

    let metrics = Sampler::new(&snapshot).collect_all();
    info!(
        "Sampled {}/4 metric categories",
        metrics.available_categories()
    );

    let mut table = MetricsTable::new();
    table.render(TerminalTable::new(), Some(&metrics), &thresholds)?;

    let source = snapshot
        .url()
        .map(str::to_string)
        .unwrap_or_else(|| snapshot_path.clone());
    let report = PerformanceReport::new(
        Some(source),
        metrics,
        thresholds,
        table.current_rows().to_vec(),
    );

    if config.json {
        println!("{}", report.to_json()?);
    } else {
        if let Some(output) = table.container() {
            print!("{}", output.output());
        }
        println!();
        println!("{}", report.summary());
    }

    if let Some(ref path) = config.output_path {
        save_report(&report, path)?;
    }

    if report.empty {
        warn!("No metric categories were available in the snapshot");
    }

    if config.strict && report.verdict == Status::Fail {
        warn!("Strict mode: failing on {} verdict", report.verdict);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
