use clap::Parser;
use std::path::PathBuf;
use threader::pipeline::{self, PipelineConfig};
use threader::ThreaderError;

#[derive(Parser)]
#[command(name = "threader")]
#[command(about = "Reconstructs a user's reply threads as one JSON payload", long_about = None)]
struct Cli {
    /// Root data directory containing one subdirectory per user
    root: PathBuf,
    /// Target user (name of the subdirectory under the root)
    user: String,
}

fn main() -> Result<(), ThreaderError> {
    let cli = Cli::parse();
    let config = PipelineConfig::new(cli.root, cli.user);

    eprintln!("[threader] processing user {}", config.user);
    let output = pipeline::run(&config);

    // Exactly one JSON object on stdout, for every outcome.
    println!("{}", serde_json::to_string(&output.to_json())?);
    Ok(())
}
