// Batch-transcribe a directory of audio segments through a remote
// speech-to-text service, producing one transcript per segment plus a
// line-wrapped combined transcript.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use batchscribe::config::{RunConfig, bearer_token_from_env};
use batchscribe::hf_router::HfRouterTranscriber;
use batchscribe::pacer::Pacer;
use batchscribe::pipeline::Pipeline;
use batchscribe::store::OutputStore;

#[derive(Parser, Debug)]
#[command(name = "batchscribe")]
#[command(about = "Resumable batch transcription of pre-segmented audio")]
struct Params {
    /// Path to the JSON run configuration (audio_dir, output_dir, ...).
    config: PathBuf,
}

fn main() -> ExitCode {
    batchscribe::logging::init();

    match run(Params::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "run aborted");
            ExitCode::FAILURE
        }
    }
}

fn run(params: Params) -> anyhow::Result<()> {
    let config = RunConfig::load(&params.config)?;
    let token = bearer_token_from_env()?;

    let transcriber = HfRouterTranscriber::new(config.endpoint.clone(), token)?;
    let pacer = Pacer::new(config.min_spacing());
    let store = OutputStore::new(&config.output_dir, config.max_line_length);

    let mut pipeline = Pipeline::new(transcriber, pacer, store)
        .keep_existing_output(config.keep_existing_output);
    pipeline.run(&config.audio_dir)?;
    Ok(())
}
