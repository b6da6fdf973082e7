use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use digit_infer_rs::digit_pipeline::{DigitPipeline, InputConvention, MlpClassifier, PipelineConfig};
use digit_infer_rs::logger;

use tracing::{debug, error, info};

#[derive(Debug, Parser)]
#[command(version, about = "Classify a handwritten digit image with a trained MLP")]
struct Cli {
    /// Image to classify
    #[arg(default_value = "test_digit.png")]
    image: PathBuf,

    /// JSON weights of the trained classifier
    #[arg(long, default_value = "models/mnist_mlp.json")]
    model: PathBuf,

    /// The image has light ink on a dark background, skip inversion
    #[arg(long)]
    light_ink: bool,

    /// Log debug output, including per-stage timings
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let classifier = MlpClassifier::load(&cli.model)
        .with_context(|| format!("loading classifier from {}", cli.model.display()))?;

    let convention = if cli.light_ink {
        InputConvention::LightInkOnDark
    } else {
        InputConvention::DarkInkOnLight
    };
    let config = PipelineConfig::builder().convention(convention).build();
    let pipeline = DigitPipeline::new(&classifier, config);

    info!("Convention: {:?}", pipeline.config().convention);

    let (prediction, timings) = pipeline
        .predict_file_with_timings(&cli.image)
        .with_context(|| format!("classifying {}", cli.image.display()))?;

    debug!("\n{}", timings.summary());
    print!("{prediction}");

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    info!("Starting digit_infer...");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Prediction failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
