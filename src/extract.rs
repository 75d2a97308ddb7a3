//! Extraction of protein-ligand pairs from delimited text.
//!
//! The accepted input is deliberately loose: the delimiter is sniffed from the
//! first line, a header row is optional, and rows that do not carry both
//! fields are dropped instead of failing the whole document.

use crate::delimiter::Delimiter;
use crate::errors::ExtractError;
use serde::{Deserialize, Serialize};
use tracing::debug;

const PROTEIN_KEYS: [&str; 2] = ["protein", "sequence"];
const LIGAND_KEYS: [&str; 2] = ["ligand", "smiles"];

/// A validated protein sequence and ligand SMILES pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub protein_sequence: String,
    pub ligand_smiles: String,
}

/// Positions of the two required fields in a split line.
///
/// `None` means the column was not found in the header; every row then fails
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub protein: Option<usize>,
    pub ligand: Option<usize>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            protein: Some(0),
            ligand: Some(1),
        }
    }
}

impl ColumnMapping {
    /// Whether the first field of a split line marks a header row.
    ///
    /// Only the first field is inspected.
    pub fn is_header(fields: &[&str]) -> bool {
        fields
            .first()
            .is_some_and(|f| contains_any(&f.to_lowercase(), &PROTEIN_KEYS))
    }

    /// Map both columns from header text, first match from the left.
    pub fn from_header(fields: &[&str]) -> Self {
        let headers: Vec<String> = fields.iter().map(|h| h.to_lowercase()).collect();
        Self {
            protein: headers.iter().position(|h| contains_any(h, &PROTEIN_KEYS)),
            ligand: headers.iter().position(|h| contains_any(h, &LIGAND_KEYS)),
        }
    }

    /// Read both mapped fields from a split line.
    fn pick(&self, fields: &[&str]) -> Option<Record> {
        let protein = self.protein.and_then(|i| fields.get(i))?;
        let ligand = self.ligand.and_then(|i| fields.get(i))?;
        if protein.is_empty() || ligand.is_empty() {
            return None;
        }
        Some(Record {
            protein_sequence: protein.to_string(),
            ligand_smiles: ligand.to_string(),
        })
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Extract all valid records from the text of one document.
///
/// # Errors
///
/// * [`ExtractError::EmptyInput`] if the text has no non-blank line
/// * [`ExtractError::NoValidRows`] if no data row has both fields
///
/// # Example
///
/// ```
/// use protlig::extract;
///
/// let records = extract("protein_sequence,ligand_smiles\nMKV,CCO").unwrap();
/// assert_eq!(records[0].ligand_smiles, "CCO");
/// ```
pub fn extract(text: &str) -> Result<Vec<Record>, ExtractError> {
    let lines: Vec<&str> = text.split('\n').filter(|l| !l.trim().is_empty()).collect();
    let Some(first_line) = lines.first() else {
        return Err(ExtractError::EmptyInput);
    };

    let delimiter = Delimiter::sniff(first_line);
    let first_fields = delimiter.split(first_line);

    let (mapping, data_start) = if ColumnMapping::is_header(&first_fields) {
        (ColumnMapping::from_header(&first_fields), 1)
    } else {
        (ColumnMapping::default(), 0)
    };

    let records: Vec<Record> = lines[data_start..]
        .iter()
        .filter_map(|line| mapping.pick(&delimiter.split(line)))
        .collect();

    if records.is_empty() {
        return Err(ExtractError::NoValidRows);
    }

    debug!(
        "Parsed {} valid rows with {} delimiter",
        records.len(),
        delimiter
    );
    Ok(records)
}
