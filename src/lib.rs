//! # protlig
//!
//! Ingest tables of protein sequence and ligand SMILES pairs and submit them to a
//! prediction backend.
//!
//! Input files are loosely formatted: the delimiter (semicolon, tab or comma) is
//! sniffed from the first line, a header row naming the columns is optional, and
//! rows missing either field are dropped. Records of several files are
//! concatenated in upload order and can be written out as a Polars DataFrame or
//! posted to the backend together with a set of prediction options.
//!
//! # Example
//!
//! ```
//! use protlig::{collect_records, BatchPolicy, RawDocument, UploadQueue};
//!
//! let mut queue = UploadQueue::new();
//! queue.add(RawDocument::new("a.csv", "protein_sequence;ligand_smiles\nMKV;CCO"));
//! queue.add(RawDocument::new("b.csv", "GHI,CN"));
//!
//! let batch = collect_records(&queue, BatchPolicy::Abort).unwrap();
//! assert_eq!(batch.records().len(), 2);
//! ```

mod batch;
mod delimiter;
mod document;
mod errors;
mod extract;
mod options;
mod status;
mod submit;
mod utils;

pub use batch::{collect_records, load_batch, Batch, BatchPolicy};
pub use delimiter::Delimiter;
pub use document::{DocumentId, RawDocument, UploadQueue};
pub use errors::{BatchError, ExtractError, SubmitError};
pub use extract::{extract, ColumnMapping, Record};
pub use options::{OptionSelection, PredictionOption};
pub use status::ProcessingState;
pub use submit::{PredictionClient, PredictionRequest, PredictionResponse};
pub use utils::{write_df_to_file, DataFrameFileType};
