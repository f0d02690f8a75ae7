mod logging;
mod report;
mod synthetic;
mod trial;

use clap::{Parser, Subcommand, ValueEnum};
use lplink_core::Orientation;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use synthetic::Shape;
use tracing::info;
use trial::Trial;

#[derive(Parser, Debug)]
#[command(author, version, about = "Stage timings for the lplink LP pipeline")]
struct Cli {
    /// Log filter (overrides LPLINK_TRACE)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve synthetic LPs and time each pipeline stage
    Run(RunArgs),
    /// Summarize trials recorded by `run`
    Report(ReportArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    #[arg(long, default_value_t = 100)]
    rows: usize,

    #[arg(long, default_value_t = 100)]
    cols: usize,

    /// Probability that a matrix cell holds a nonzero
    #[arg(long, default_value_t = 0.05, value_parser = parse_density)]
    density: f64,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    repetitions: u32,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Matrix layout handed to the engine
    #[arg(long, value_enum, default_value_t = Layout::Csc)]
    layout: Layout,

    /// Also write one JSON line per trial to this file
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// JSON-lines file written by `run --output`
    #[arg(long)]
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum Layout {
    Csr,
    Csc,
}

impl From<Layout> for Orientation {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Csr => Orientation::RowWise,
            Layout::Csc => Orientation::ColumnWise,
        }
    }
}

fn parse_density(raw: &str) -> Result<f64, String> {
    let density: f64 = raw.parse().map_err(|err| format!("{err}"))?;
    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(format!("{density} is not within [0, 1]"))
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.log.as_deref())?;
    match cli.command {
        Command::Run(args) => run_trials(args),
        Command::Report(args) => {
            let trials = trial::read_trials(BufReader::new(File::open(&args.input)?))?;
            render(args.format, &trials)
        }
    }
}

fn run_trials(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let shape = Shape {
        rows: args.rows,
        cols: args.cols,
        density: args.density,
    };
    let trials = (1..=args.repetitions)
        .map(|repetition| -> Result<Trial, Box<dyn std::error::Error>> {
            let trial = Trial::measure(shape, args.seed, args.layout.into(), repetition)?;
            info!(
                component = "bench",
                operation = "run",
                status = "success",
                case = %trial.case,
                repetition,
                model_status = %trial.model_status,
                total_ms = trial.stages_ms.total,
                "Finished trial"
            );
            Ok(trial)
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(path) = &args.output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        trial::write_trials(BufWriter::new(File::create(path)?), &trials)?;
        eprintln!("wrote {} trials to {}", trials.len(), path.display());
    }
    render(args.format, &trials)
}

fn render(format: OutputFormat, trials: &[Trial]) -> Result<(), Box<dyn std::error::Error>> {
    let summaries = report::summarize(trials);
    match format {
        OutputFormat::Table => {
            report::print_table(&summaries);
            for ((case, status), count) in report::status_counts(trials) {
                println!("{case}: {count} x {status}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
    }
    Ok(())
}
