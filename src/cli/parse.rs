use clap::Parser;
use protlig::{load_batch, write_df_to_file, BatchPolicy, DataFrameFileType};
use std::path::PathBuf;
use tracing::{debug, error, info, trace};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Delimited files holding protein sequences and ligand SMILES, in upload order
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Name of the output file
    #[arg(short = 'f', long = "filename", default_value_t = String::from("records"))]
    filename: String,

    /// Output file type
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// What to do with a file that yields no valid rows
    #[arg(long = "on-invalid", default_value = "abort")]
    policy: BatchPolicy,
}

pub(crate) async fn run(args: &Args) {
    trace!("{args:?}");

    let batch = match load_batch(&args.input, args.policy).await {
        Ok(batch) => batch,
        Err(e) => {
            error!("{e}");
            return;
        }
    };

    match batch.summary() {
        Ok(summary) => debug!("Records per document\n{summary}"),
        Err(e) => error!("Failed to summarize records: {e}"),
    }

    let mut df_records = match batch.to_dataframe() {
        Ok(df) => df,
        Err(e) => {
            error!("Failed to build the record table: {e}");
            return;
        }
    };

    // Prepare output directory
    if let Err(e) = std::fs::create_dir_all(&args.output) {
        error!("Failed to create the output directory: {e}");
        return;
    }
    let output_file = args
        .output
        .join(args.filename.clone())
        .with_extension(args.output_format.to_string());

    if let Err(e) = write_df_to_file(&mut df_records, &output_file, args.output_format) {
        error!("Failed to write {}: {e}", output_file.display());
        return;
    }
    info!(
        "Saved {} records from {} documents to {}",
        df_records.height(),
        batch.documents().len(),
        output_file.display()
    );
}
