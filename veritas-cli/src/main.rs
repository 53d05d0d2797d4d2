use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use veritas::tracing::prefix;
use veritas_verify::{AnalysisRequest, Pipeline, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "veritas")]
#[command(about = "Score text for misinformation risk")]
#[command(version)]
struct Args {
    /// Text file to analyze (reads stdin when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// URL the text was published at
    #[arg(short, long)]
    url: Option<String>,

    /// JSON pipeline configuration; missing keys keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (debug, info, warn, error); RUST_LOG overrides
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    veritas::tracing::init_with_filter(&args.log_level);

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            PipelineConfig::from_json_file(path)?
        }
        None => PipelineConfig::default(),
    };

    let text = read_input(args.file.as_ref())?;
    if text.trim().is_empty() {
        warn!("{} input is empty; the report will be neutral", prefix::PIPELINE_OPEN);
    }

    let pipeline = Pipeline::builder(config)
        .with_simulated_sources()
        .build()
        .map_err(veritas::Error::from)?;

    let mut request = AnalysisRequest::new(text);
    if let Some(url) = args.url {
        request = request.with_url(url);
    }

    let report = pipeline.analyze(&request).await;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}

fn read_input(file: Option<&PathBuf>) -> veritas::Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
