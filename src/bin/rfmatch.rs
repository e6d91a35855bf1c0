use clap::{Parser, Subcommand};
use num_complex::Complex64;
use rfmatch::prelude::*;
use serde_json::json;
use simple_error::SimpleError;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error("{0}")]
    Parse(#[from] SimpleError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "rfmatch")]
#[command(about = "L-section impedance matching and Smith chart mapping", long_about = None)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize the matching networks for one source/target pair
    Solve {
        /// Source impedance, e.g. "20-10j"
        #[arg(long, value_parser = parse_complex, allow_hyphen_values = true)]
        zs: Complex64,
        /// Target impedance, e.g. "60+60j"
        #[arg(long, value_parser = parse_complex, allow_hyphen_values = true)]
        zt: Complex64,
        /// Reference impedance in ohms
        #[arg(long, default_value_t = 50.0)]
        z0: f64,
        /// Operating frequency, e.g. "2.44GHz"
        #[arg(long, value_parser = parse_frequency)]
        freq: f64,
        /// Only consider this topology (normal or reversed)
        #[arg(long)]
        topology: Option<Topology>,
        /// Flag inductors at or above this value (H)
        #[arg(long)]
        max_inductance: Option<f64>,
        /// Flag capacitors at or above this value (F)
        #[arg(long)]
        max_capacitance: Option<f64>,
    },
    /// Synthesize every spec of a JSON array (file path or "-" for stdin)
    Batch {
        input: PathBuf,
    },
    /// Reflection coefficient of an impedance
    Gamma {
        /// Impedance, or admittance with --admittance
        #[arg(value_parser = parse_complex, allow_hyphen_values = true)]
        value: Complex64,
        /// Reference impedance in ohms
        #[arg(long, default_value_t = 50.0)]
        z0: f64,
        /// Treat the value as an admittance in siemens
        #[arg(long)]
        admittance: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Solve {
            zs,
            zt,
            z0,
            freq,
            topology,
            max_inductance,
            max_capacitance,
        } => build_synthesizer(topology, max_inductance, max_capacitance)
            .and_then(|synth| cmd_solve(&synth, zs, zt, z0, freq, cli.json)),
        Commands::Batch { input } => cmd_batch(&input, cli.json),
        Commands::Gamma {
            value,
            z0,
            admittance,
        } => cmd_gamma(value, z0, admittance, cli.json),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn build_synthesizer(
    topology: Option<Topology>,
    max_inductance: Option<f64>,
    max_capacitance: Option<f64>,
) -> CliResult<Synthesizer> {
    let defaults = PracticalLimits::default();
    let limits = PracticalLimits::new(
        max_inductance.unwrap_or(defaults.max_inductance),
        max_capacitance.unwrap_or(defaults.max_capacitance),
    )?;
    let mut builder = Synthesizer::builder().limits(limits);
    if let Some(topology) = topology {
        builder = builder.topologies(&[topology]);
    }
    Ok(builder.build()?)
}

fn cmd_solve(
    synth: &Synthesizer,
    zs: Complex64,
    zt: Complex64,
    z0: f64,
    freq: f64,
    as_json: bool,
) -> CliResult<()> {
    let spec = MatchSpec::new(zs, zt, z0, freq)?;
    let solutions = synth.synthesize(&spec)?;
    if as_json {
        let out = json!({ "spec": spec, "solutions": solutions });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_solutions(&spec, &solutions);
    }
    Ok(())
}

fn print_solutions(spec: &MatchSpec, solutions: &[NetworkSolution]) {
    println!(
        "Zs = {}  Zt = {}  Z0 = {}  f = {}",
        spec.zs(),
        spec.zt(),
        format_si(spec.z0(), "Ω"),
        format_si(spec.freq(), "Hz")
    );
    if solutions.is_empty() {
        println!("  no L-section match");
        return;
    }
    for solution in solutions {
        println!("  {}", solution);
    }
}

fn read_input(path: &Path) -> CliResult<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn cmd_batch(path: &Path, as_json: bool) -> CliResult<()> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(&read_input(path)?)?;
    info!(count = entries.len(), "batch loaded");

    // a malformed entry only fails its own slot
    let parsed: Vec<Result<MatchSpec, String>> = entries
        .into_iter()
        .map(|entry| serde_json::from_value::<MatchSpec>(entry).map_err(|err| err.to_string()))
        .collect();
    let specs: Vec<MatchSpec> = parsed.iter().filter_map(|p| p.as_ref().ok().copied()).collect();
    let mut results = Synthesizer::default().synthesize_batch(&specs).into_iter();

    let mut report = Vec::with_capacity(parsed.len());
    for (index, entry) in parsed.iter().enumerate() {
        let outcome = match entry {
            Ok(spec) => match results.next() {
                Some(Ok(solutions)) => Ok((*spec, solutions)),
                Some(Err(err)) => Err(err.to_string()),
                None => Err("missing batch result".to_string()),
            },
            Err(err) => Err(err.clone()),
        };
        if let Err(err) = &outcome {
            warn!(index, error = %err, "batch entry failed");
        }
        report.push(outcome);
    }

    if as_json {
        let out: Vec<serde_json::Value> = report
            .iter()
            .enumerate()
            .map(|(index, outcome)| match outcome {
                Ok((spec, solutions)) => {
                    json!({ "index": index, "spec": spec, "solutions": solutions })
                }
                Err(err) => json!({ "index": index, "error": err }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (index, outcome) in report.iter().enumerate() {
            print!("[{}] ", index);
            match outcome {
                Ok((spec, solutions)) => print_solutions(spec, solutions),
                Err(err) => println!("error: {}", err),
            }
        }
    }
    Ok(())
}

fn cmd_gamma(value: Complex64, z0: f64, admittance: bool, as_json: bool) -> CliResult<()> {
    let gamma = if admittance {
        y2gamma(value, z0)?
    } else {
        z2gamma(value, z0)?
    };
    let (mag, angle) = gamma.to_polar();
    if as_json {
        let out = json!({
            "gamma": [gamma.re, gamma.im],
            "magnitude": mag,
            "angle_deg": angle.to_degrees(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "Γ = {:.6} {:+.6}j  |Γ| = {:.6}  ∠ {:.3}°",
            gamma.re,
            gamma.im,
            mag,
            angle.to_degrees()
        );
    }
    Ok(())
}
