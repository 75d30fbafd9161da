//! Command-line interface for the contribcal binary.
//!
//! The CLI exposes subcommands for resolving a user's contribution calendar
//! into heatmap rendering instructions and for emitting instructions from a
//! deterministic synthetic dataset.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process,
};

use chrono::Utc;
use clap::{ArgAction, Args, Parser, Subcommand};
use contribcal::{
    CalendarRange, ContributionSource, Error, HeatmapSpec, echarts, heatmap, io_error, mock,
};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line interface for generating heatmap rendering instructions.
#[derive(Debug, Parser,)]
#[command(name = "contribcal", version, about = "Compile contribution calendars into heatmap instructions")]
/// Top-level CLI options parsed from user input.
struct Cli
{
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand,)]
/// Supported commands exposed by the CLI.
enum Command
{
    /// Resolve a user's contributions and emit heatmap instructions.
    Render(RenderArgs,),
    /// Emit heatmap instructions from a synthetic dataset.
    Mock(MockArgs,),
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `render` subcommand.
struct RenderArgs
{
    /// GitHub login whose contribution calendar is rendered.
    #[arg(long = "user", value_name = "LOGIN")]
    user: String,

    /// GitHub token; when absent the synthetic fallback path is used.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String,>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args,)]
/// Arguments accepted by the `mock` subcommand.
struct MockArgs
{
    /// Seed for deterministic synthetic data; omit for a fresh series.
    #[arg(long = "seed", value_name = "SEED")]
    seed: Option<u64,>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args,)]
/// Output options shared by all subcommands.
struct OutputArgs
{
    /// Emit the concrete ECharts option instead of the renderer-agnostic
    /// spec.
    #[arg(long = "echarts", action = ArgAction::SetTrue)]
    echarts: bool,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,

    /// Write instructions to a file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    output: Option<PathBuf,>,
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    if let Err(error,) = run().await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors originating from output serialization and writing. The
/// contribution resolution itself never fails; it degrades to synthetic
/// data.
async fn run() -> Result<(), Error,>
{
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env(),).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render(args,) => run_render(args,).await,
        Command::Mock(args,) => run_mock(&args,),
    }
}

async fn run_render(args: RenderArgs,) -> Result<(), Error,>
{
    let range = CalendarRange::trailing_year(Utc::now().date_naive(),);
    let source = ContributionSource::for_user(args.user.as_str(), args.token.as_deref(),);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}",)
            .expect("valid template",),
    );
    pb.set_message(format!("Resolving contributions for {}...", args.user),);

    let resolution = source.resolve(&range,).await;

    pb.finish_with_message(resolution.status.clone(),);
    info!("{}", resolution.status);

    let spec = heatmap::compile(&resolution.dataset, &range,);

    emit(&spec, &args.output,)
}

fn run_mock(args: &MockArgs,) -> Result<(), Error,>
{
    let range = CalendarRange::trailing_year(Utc::now().date_naive(),);

    let dataset = match args.seed {
        Some(seed,) => mock::generate(&range, &mut StdRng::seed_from_u64(seed,),),
        None => mock::generate_default(&range,),
    };

    let spec = heatmap::compile(&dataset, &range,);

    emit(&spec, &args.output,)
}

/// Serializes the instructions in the requested shape and destination.
fn emit(spec: &HeatmapSpec, args: &OutputArgs,) -> Result<(), Error,>
{
    let value = if args.echarts {
        echarts::heatmap_option(spec,)
    } else {
        serde_json::to_value(spec,)?
    };

    match args.output.as_deref() {
        Some(path,) => write_to_file(path, &value, args.pretty,),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_value(&mut handle, &value, args.pretty,)
        }
    }
}

fn write_value<W: io::Write,>(writer: &mut W, value: &Value, pretty: bool,) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(writer, value,)?;
    } else {
        serde_json::to_writer(writer, value,)?;
    }

    Ok((),)
}

fn write_to_file(path: &Path, value: &Value, pretty: bool,) -> Result<(), Error,>
{
    let rendered = if pretty {
        serde_json::to_string_pretty(value,)?
    } else {
        serde_json::to_string(value,)?
    };

    fs::write(path, rendered,).map_err(|source| io_error(path, source,),)?;

    Ok((),)
}
