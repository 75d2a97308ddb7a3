use thiserror::Error;

/// Failure to extract any records from a single document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The document has no non-blank lines.
    #[error("CSV file is empty")]
    EmptyInput,
    /// Every data line failed the two-field requirement.
    #[error(
        "No valid rows found in CSV (each row needs both protein_sequence and ligand_smiles)"
    )]
    NoValidRows,
}

/// Failure while aggregating several documents.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A file could not be read from disk.
    #[error("Failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    /// A document produced no records.
    #[error("{name}: {source}")]
    Extract {
        name: String,
        #[source]
        source: ExtractError,
    },
    /// Nothing was uploaded, or every document was skipped.
    #[error("No records were extracted from the uploaded documents")]
    Empty,
}

/// Failure while talking to the prediction backend.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please upload at least 1 document")]
    NoData,
    #[error("At least one option must be selected")]
    NoOptions,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("Backend returned status {status}{}", body_excerpt(.body))]
    Status { status: u16, body: String },
}

const BODY_EXCERPT_CHARS: usize = 200;

fn body_excerpt(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }
    let mut excerpt: String = body.chars().take(BODY_EXCERPT_CHARS).collect();
    if body.chars().count() > BODY_EXCERPT_CHARS {
        excerpt.push_str("...");
    }
    format!(": {excerpt}")
}
