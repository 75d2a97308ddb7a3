use clap::Parser;
use protlig::{
    load_batch, BatchPolicy, OptionSelection, PredictionClient, PredictionOption,
    PredictionRequest, PredictionResponse, ProcessingState,
};
use std::path::PathBuf;
use tracing::{error, info, trace, warn};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Delimited files holding protein sequences and ligand SMILES, in upload order
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Prediction options to apply; may be repeated or comma-separated
    #[arg(short = 'p', long = "option", value_delimiter = ',', required = true)]
    options: Vec<PredictionOption>,

    /// Base URL of the prediction backend
    #[arg(
        short,
        long = "backend-url",
        env = "PROTLIG_BACKEND_URL",
        default_value = "http://localhost:8000"
    )]
    backend_url: String,

    /// Save the backend response as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to do with a file that yields no valid rows
    #[arg(long = "on-invalid", default_value = "abort")]
    policy: BatchPolicy,
}

pub(crate) async fn run(args: &Args) {
    trace!("{args:?}");

    let selection: OptionSelection = args.options.iter().copied().collect();
    let document_count = args.input.len();
    let options_count = selection.options().len();

    let mut state = ProcessingState::Idle;
    if !selection.can_process(document_count, state.is_processing()) {
        error!("Need at least one document and one option");
        return;
    }

    state = ProcessingState::Processing;
    if let Some(line) = state.describe(document_count, options_count) {
        info!("{line}");
    }

    state = match process(args, &selection).await {
        Ok(response) => ProcessingState::Complete(response),
        Err(e) => ProcessingState::failed(e),
    };

    match &state {
        ProcessingState::Complete(response) => {
            if response.errors > 0 {
                warn!(
                    "{} of {} rows failed: {:?}",
                    response.errors,
                    response.total_processed,
                    response.error_details.clone().unwrap_or_default()
                );
            }
            save_or_print(args, response);
            if let Some(line) = state.describe(document_count, options_count) {
                info!("{line}");
            }
        }
        ProcessingState::Failed(_) => {
            if let Some(line) = state.describe(document_count, options_count) {
                error!("{line}");
            }
        }
        _ => {}
    }
}

async fn process(
    args: &Args,
    selection: &OptionSelection,
) -> Result<PredictionResponse, Box<dyn std::error::Error>> {
    let batch = load_batch(&args.input, args.policy).await?;
    let request =
        PredictionRequest::new(batch.into_records(), selection.options().to_vec())?;

    let response = PredictionClient::new(args.backend_url.clone())
        .predict(&request)
        .await?;
    Ok(response)
}

fn save_or_print(args: &Args, response: &PredictionResponse) {
    let json = match serde_json::to_string_pretty(response) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize the backend response: {e}");
            return;
        }
    };
    match &args.output {
        Some(path) => match std::fs::write(path, json) {
            Ok(()) => info!("Results saved to {}", path.display()),
            Err(e) => error!("Failed to write {}: {e}", path.display()),
        },
        None => println!("{json}"),
    }
}
