use crate::submit::PredictionResponse;

const FAILURE_PREFIX: &str = "Failed to process documents";

/// Progress of a submission as shown to the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ProcessingState {
    #[default]
    Idle,
    Processing,
    Complete(PredictionResponse),
    Failed(String),
}

impl ProcessingState {
    pub fn failed(err: impl std::fmt::Display) -> Self {
        ProcessingState::Failed(format!("{FAILURE_PREFIX}: {err}"))
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, ProcessingState::Processing)
    }

    /// User-facing status line, or `None` while idle.
    pub fn describe(&self, document_count: usize, options_count: usize) -> Option<String> {
        match self {
            ProcessingState::Idle => None,
            ProcessingState::Processing => Some(format!(
                "Processing {document_count} {} with {options_count} {}...",
                plural(document_count, "document"),
                plural(options_count, "option"),
            )),
            ProcessingState::Complete(_) => Some(format!(
                "Successfully processed {document_count} {}.",
                plural(document_count, "document")
            )),
            ProcessingState::Failed(message) => Some(message.clone()),
        }
    }
}

fn plural(n: usize, noun: &str) -> String {
    match n {
        1 => noun.to_string(),
        _ => format!("{noun}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{BatchError, ExtractError};

    #[test]
    fn failure_message_has_prefix() {
        let err = BatchError::Extract {
            name: "pairs.csv".to_string(),
            source: ExtractError::NoValidRows,
        };
        let state = ProcessingState::failed(err);
        assert_eq!(
            state.describe(1, 1).unwrap(),
            "Failed to process documents: pairs.csv: No valid rows found in CSV \
             (each row needs both protein_sequence and ligand_smiles)"
        );
    }

    #[test]
    fn progress_wording() {
        assert_eq!(ProcessingState::Idle.describe(3, 2), None);
        assert_eq!(
            ProcessingState::Processing.describe(1, 2).unwrap(),
            "Processing 1 document with 2 options..."
        );
        assert_eq!(
            ProcessingState::Complete(PredictionResponse::default())
                .describe(2, 1)
                .unwrap(),
            "Successfully processed 2 documents."
        );
        assert!(ProcessingState::Processing.is_processing());
    }
}
