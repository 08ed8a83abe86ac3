use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "scrollreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a step table and the step states at chosen progress values.
    Segments(SegmentsArgs),
    /// Replay a scripted session through the full page and dump every frame.
    Simulate(SimulateArgs),
    /// Print the static content catalog with resolved asset paths.
    Content(ContentArgs),
}

#[derive(Parser, Debug)]
struct SegmentsArgs {
    /// Number of steps in the section.
    #[arg(long)]
    steps: usize,

    /// Overlap and motion preset.
    #[arg(long, value_enum, default_value_t = Preset::Process)]
    preset: Preset,

    /// Progress values to sample, in [0, 1].
    #[arg(long = "at", num_args = 1..)]
    at: Vec<f64>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Simulation script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Site configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ContentArgs {
    /// Asset base path, e.g. `/my-site`.
    #[arg(long)]
    base_path: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    Process,
    Work,
}

#[derive(serde::Serialize)]
struct SegmentSample {
    progress: f64,
    steps: Vec<scrollreel::StepVisualState>,
    indicator: scrollreel::IndicatorState,
    section_opacity: f64,
}

#[derive(serde::Serialize)]
struct SegmentsReport {
    table: scrollreel::SegmentTable,
    samples: Vec<SegmentSample>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).ok(),
        ))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Segments(args) => cmd_segments(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Content(args) => cmd_content(args),
    }
}

fn cmd_segments(args: SegmentsArgs) -> anyhow::Result<()> {
    let config = match args.preset {
        Preset::Process => scrollreel::SegmentConfig::process(),
        Preset::Work => scrollreel::SegmentConfig::work(),
    };
    let table = scrollreel::SegmentTable::partition(args.steps, config)?;
    let samples = args
        .at
        .iter()
        .map(|&p| {
            anyhow::ensure!(p.is_finite(), "progress must be finite (got {p})");
            Ok(SegmentSample {
                progress: p,
                steps: scrollreel::compute_visual_state(p, &table),
                indicator: table.indicator(p),
                section_opacity: table.section_opacity(p),
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    write_json(None, &SegmentsReport { table, samples })
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => scrollreel::SiteConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => scrollreel::SiteConfig::default(),
    };
    let script = read_script(&args.script)?;
    let frames = script.run(config).with_context(|| "run simulation")?;
    write_json(args.out.as_deref(), &frames)?;
    if let Some(out) = &args.out {
        eprintln!("wrote {} ({} frames)", out.display(), frames.len());
    }
    Ok(())
}

fn cmd_content(args: ContentArgs) -> anyhow::Result<()> {
    let assets = scrollreel::AssetPaths::detect(args.base_path.as_deref());
    write_json(None, &scrollreel::CatalogSnapshot::resolve(&assets))
}

fn read_script(path: &Path) -> anyhow::Result<scrollreel::SimulationScript> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let script: scrollreel::SimulationScript = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse script '{}'", path.display()))?;
    script.validate()?;
    Ok(script)
}

/// `RUST_LOG` when set and valid, `warn` otherwise.
fn log_filter(spec: Option<String>) -> tracing_subscriber::EnvFilter {
    spec.and_then(|s| tracing_subscriber::EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| tracing_subscriber::EnvFilter::new("warn"))
}

fn write_json<T: serde::Serialize>(out: Option<&Path>, value: &T) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, value).with_context(|| "serialize JSON")?;
            w.flush()
                .with_context(|| format!("write output '{}'", path.display()))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, value).with_context(|| "serialize JSON")?;
            writeln!(w).with_context(|| "write stdout")?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/bin/scrollreel.rs"]
mod tests;
