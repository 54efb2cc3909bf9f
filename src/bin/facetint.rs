use std::{path::PathBuf, process::ExitCode, sync::Arc};

use clap::{Args, Parser, Subcommand};
use facetint::{
    FacePipeline, FacetintResult, LandmarkOracle, Operation, OutputReference, PipelineSettings,
    StaticLandmarkOracle,
};

#[derive(Parser, Debug)]
#[command(name = "facetint", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Log at DEBUG instead of INFO (stderr).
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a grayscale copy of the image.
    Grayscale(CommonArgs),
    /// Fill the lips of the first detected face.
    Lips(FeatureArgs),
    /// Fill the eyebrows of the first detected face.
    Eyebrows(FeatureArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Source image: a path or a `file://` URI.
    #[arg(long = "in")]
    image_ref: String,

    /// Pipeline settings JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for output artifacts (overrides config and environment).
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FeatureArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Fill color, `#RRGGBB` or `#RRGGBBAA`. Malformed values fall back to black.
    #[arg(long, default_value = "#000000")]
    color: String,

    /// Face records JSON replayed as the detector output.
    #[arg(long, required = true)]
    landmarks: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.cmd).await {
        Ok(output) => {
            println!("{}", serde_json::json!({ "status": "ok", "output": output }));
            ExitCode::SUCCESS
        }
        Err(e) => {
            let report = e.report();
            println!(
                "{}",
                serde_json::json!({
                    "status": "error",
                    "kind": report.kind,
                    "message": report.message,
                })
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cmd: Command) -> FacetintResult<OutputReference> {
    let (common, op, landmarks) = match cmd {
        Command::Grayscale(common) => {
            let op = Operation::Grayscale {
                image_ref: common.image_ref.clone(),
            };
            (common, op, None)
        }
        Command::Lips(args) => {
            let op = Operation::LipColor {
                image_ref: args.common.image_ref.clone(),
                hex_color: args.color,
            };
            (args.common, op, Some(args.landmarks))
        }
        Command::Eyebrows(args) => {
            let op = Operation::EyebrowColor {
                image_ref: args.common.image_ref.clone(),
                hex_color: args.color,
            };
            (args.common, op, Some(args.landmarks))
        }
    };

    let settings = load_settings(&common)?;
    let oracle: Arc<dyn LandmarkOracle> = match landmarks {
        Some(path) => Arc::new(StaticLandmarkOracle::from_json_path(&path)?),
        None => Arc::new(StaticLandmarkOracle::empty()),
    };

    let pipeline = FacePipeline::with_oracle(oracle, settings)?;
    tracing::debug!(operation = op.name(), settings = ?pipeline.settings(), "starting");
    pipeline.dispatch(op).wait().await
}

fn load_settings(common: &CommonArgs) -> FacetintResult<PipelineSettings> {
    let mut settings = match &common.config {
        Some(path) => PipelineSettings::from_json_path(path)?,
        None => PipelineSettings::default(),
    }
    .with_env_overrides();
    if let Some(dir) = &common.out_dir {
        settings.output_dir = Some(dir.clone());
    }
    settings.validate()?;
    Ok(settings)
}
