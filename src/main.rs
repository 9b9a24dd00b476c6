use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;

use studio_acoustics::acoustics::frequency_response::{
    synthesize_frequency_response, synthesize_frequency_response_with,
};
use studio_acoustics::acoustics::heatmap::build_degradation_heatmap;
use studio_acoustics::acoustics::room_modes::compute_room_modes;
use studio_acoustics::acoustics::rt60::compare_rt60;
use studio_acoustics::color::{to_hex, PositionColors, StiQuality};
use studio_acoustics::data::export::{generate_filename, to_csv_string};
use studio_acoustics::data::filter::filter_by_frequency_range;
use studio_acoustics::data::loader::{load_measurements, load_smaart_log};
use studio_acoustics::data::model::{Measurements, SmaartMeasurementBundle};
use studio_acoustics::AnalysisConfig;

/// Studio acoustics - parse measurement exports and derive room metrics
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Room/catalog configuration JSON (defaults to Studio 8)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    format: OutputFormat,

    /// Write output to a dated file (e.g. `room_modes_2026-10-18.csv`) instead of stdout
    #[arg(long, global = true)]
    save: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a measurement export (.csv frequency response, .txt/.log Smaart log)
    Parse { path: PathBuf },
    /// Axial and tangential room modes up to 500 Hz
    Modes,
    /// Synthesized frequency response per measurement position
    Response {
        /// Seed the jitter for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 20.0)]
        min: f64,
        #[arg(long, default_value_t = 20000.0)]
        max: f64,
    },
    /// STI degradation per position and octave band
    Heatmap,
    /// Measurement positions with STI quality
    Positions,
    /// RT60 before/after treatment from two Smaart logs
    Compare {
        #[arg(long)]
        current: PathBuf,
        #[arg(long)]
        predicted: PathBuf,
    },
}

impl Command {
    fn file_prefix(&self) -> &'static str {
        match self {
            Command::Parse { .. } => "measurements",
            Command::Modes => "room_modes",
            Command::Response { .. } => "frequency_response",
            Command::Heatmap => "sti_heatmap",
            Command::Positions => "positions",
            Command::Compare { .. } => "rt60_comparison",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Where rendered output goes: stdout, or a dated file.
struct Sink {
    format: OutputFormat,
    save_as: Option<String>,
}

impl Sink {
    fn from_args(args: &Args) -> Self {
        let save_as = args
            .save
            .then(|| generate_filename(args.command.file_prefix(), args.format.extension()));
        Self {
            format: args.format,
            save_as,
        }
    }

    fn write(&self, text: &str) -> Result<()> {
        match &self.save_as {
            Some(path) => {
                std::fs::write(path, format!("{text}\n"))
                    .with_context(|| format!("writing {path}"))?;
                info!("Saved output to {path}");
            }
            None => println!("{text}"),
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    debug!("Using room '{}'", config.room.name);
    let sink = Sink::from_args(args);

    match &args.command {
        Command::Parse { path } => match load_measurements(path)? {
            Measurements::FrequencyResponse(records) => emit_rows(&records, &sink),
            Measurements::Smaart(bundle) => emit_bundle(&bundle, &sink),
        },
        Command::Modes => {
            let modes = compute_room_modes(&config.room.dimensions);
            info!(
                "{} room modes for {} ({:.1} m³)",
                modes.len(),
                config.room.name,
                config.room.volume_cubic_meters()
            );
            emit_rows(&modes, &sink)
        }
        Command::Response { seed, min, max } => {
            let catalog = config.build_catalog()?;
            let points = match seed {
                Some(seed) => {
                    synthesize_frequency_response_with(&catalog, &mut StdRng::seed_from_u64(*seed))
                }
                None => synthesize_frequency_response(&catalog),
            };
            emit_rows(&filter_by_frequency_range(&points, *min, *max), &sink)
        }
        Command::Heatmap => {
            let catalog = config.build_catalog()?;
            emit_rows(&build_degradation_heatmap(&catalog), &sink)
        }
        Command::Positions => {
            let catalog = config.build_catalog()?;
            let colors = PositionColors::new(&catalog, &[]);
            let rows: Vec<_> = catalog
                .iter()
                .map(|(name, pos)| {
                    let quality = StiQuality::from_degradation(pos.degradation);
                    json!({
                        "name": name,
                        "label": pos.label,
                        "x": pos.x,
                        "y": pos.y,
                        "z": pos.z,
                        "sti": pos.sti,
                        "degradation": pos.degradation,
                        "quality": quality.label(),
                        "qualityColor": quality.hex(),
                        "seriesColor": colors.color_for(name).map(to_hex),
                        "reference": catalog.is_reference(name),
                    })
                })
                .collect();
            emit_rows(&rows, &sink)
        }
        Command::Compare { current, predicted } => {
            let current = load_smaart_log(current)?;
            let predicted = load_smaart_log(predicted)?;
            let comparison = compare_rt60(&current.rt60_by_freq, &predicted.rt60_by_freq);
            if let Some(pct) = comparison.improvement_percent {
                info!("Average RT60 improvement: {pct:.0}%");
            }
            match sink.format {
                OutputFormat::Json => emit_json(&comparison, &sink),
                OutputFormat::Csv => emit_rows(&comparison.bands, &sink),
            }
        }
    }
}

/// Smaart bundles print as-is in JSON, one row per band in CSV.
fn emit_bundle(bundle: &SmaartMeasurementBundle, sink: &Sink) -> Result<()> {
    match sink.format {
        OutputFormat::Json => emit_json(bundle, sink),
        OutputFormat::Csv => {
            let mut bands: Vec<u32> = bundle
                .rt60_by_freq
                .keys()
                .chain(bundle.sti_by_freq.keys())
                .copied()
                .collect();
            bands.sort_unstable();
            bands.dedup();
            let rows: Vec<_> = bands
                .iter()
                .map(|band| {
                    json!({
                        "frequency": band,
                        "rt60": bundle.rt60_by_freq.get(band),
                        "sti": bundle.sti_by_freq.get(band),
                    })
                })
                .collect();
            emit_rows(&rows, sink)
        }
    }
}

fn emit_rows<T: Serialize>(rows: &[T], sink: &Sink) -> Result<()> {
    match sink.format {
        OutputFormat::Json => emit_json(rows, sink),
        OutputFormat::Csv => match to_csv_string(rows)? {
            Some(text) => sink.write(&text),
            None => Ok(()),
        },
    }
}

fn emit_json<T: Serialize + ?Sized>(value: &T, sink: &Sink) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing output")?;
    sink.write(&text)
}
