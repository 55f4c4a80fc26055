//! dart-vision CLI: score one throw from six image files.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dart_vision::core::ViewTriple;
use dart_vision::io::load_frame;
use dart_vision::{PipelineParams, SharedParams, ThrowProcessor};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "dart-vision")]
#[command(about = "Score a dart throw seen by three fixed cameras")]
#[command(version)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one throw from previous/current images of each view.
    Score(ScoreArgs),

    /// Print the default pipeline configuration as JSON.
    DefaultConfig,
}

#[derive(Debug, Clone, Args)]
struct ScoreArgs {
    /// Top view before the throw.
    #[arg(long)]
    prev_top: PathBuf,
    /// Top view after the throw.
    #[arg(long)]
    cur_top: PathBuf,
    /// Right view before the throw.
    #[arg(long)]
    prev_right: PathBuf,
    /// Right view after the throw.
    #[arg(long)]
    cur_right: PathBuf,
    /// Left view before the throw.
    #[arg(long)]
    prev_left: PathBuf,
    /// Left view after the throw.
    #[arg(long)]
    cur_left: PathBuf,

    /// Pipeline configuration (JSON); missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    #[cfg(feature = "tracing")]
    {
        // RUST_LOG selects the level under tracing
        let _ = verbose;
        dart_vision::core::init_tracing(false);
        let _ = tracing_log::LogTracer::init();
    }
    #[cfg(not(feature = "tracing"))]
    {
        use log::LevelFilter;
        let level = match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        let _ = dart_vision::core::init_with_level(level);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Score(args) => run_score(&args),
        Commands::DefaultConfig => run_default_config(),
    };
    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_default_config() -> CliResult<()> {
    println!("{}", PipelineParams::default().to_json_string()?);
    Ok(())
}

fn run_score(args: &ScoreArgs) -> CliResult<()> {
    let params = match &args.config {
        Some(path) => PipelineParams::from_json_file(path)?,
        None => PipelineParams::default(),
    };
    let previous = ViewTriple::new(
        load_frame(&args.prev_top)?,
        load_frame(&args.prev_right)?,
        load_frame(&args.prev_left)?,
    );
    let current = ViewTriple::new(
        load_frame(&args.cur_top)?,
        load_frame(&args.cur_right)?,
        load_frame(&args.cur_left)?,
    );

    let processor = ThrowProcessor::from_params(SharedParams::new(params));
    let report = processor.process(&previous, &current)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
