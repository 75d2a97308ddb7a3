use crate::document::{RawDocument, UploadQueue};
use crate::errors::BatchError;
use crate::extract::Record;
use polars::prelude::*;
use std::path::PathBuf;
use tracing::{debug, warn};

/// What to do when one document in a batch yields no records.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Abort the whole batch
    #[default]
    Abort,
    /// Log a warning and leave the document out
    Skip,
}

/// Records of all documents, concatenated in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    documents: Vec<(String, usize)>,
    records: Vec<Record>,
}

impl Batch {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Names and record counts of the documents that contributed.
    pub fn documents(&self) -> &[(String, usize)] {
        &self.documents
    }

    /// Combined table with `document_index`, `document`, `protein_sequence` and
    /// `ligand_smiles` columns. The index is the upload position of the document.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let document_index = self
            .documents
            .iter()
            .enumerate()
            .flat_map(|(i, (_, n))| std::iter::repeat(i as u32).take(*n))
            .collect::<Vec<u32>>();
        let document = self
            .documents
            .iter()
            .flat_map(|(name, n)| std::iter::repeat(name.to_owned()).take(*n))
            .collect::<Vec<String>>();
        df!(
            "document_index" => document_index,
            "document" => document,
            "protein_sequence" => self.records.iter().map(|x| x.protein_sequence.to_owned()).collect::<Vec<String>>(),
            "ligand_smiles" => self.records.iter().map(|x| x.ligand_smiles.to_owned()).collect::<Vec<String>>(),
        )
    }

    /// Number of records per document, in upload order.
    ///
    /// Documents sharing a file name keep separate rows.
    pub fn summary(&self) -> PolarsResult<DataFrame> {
        self.to_dataframe()?
            .lazy()
            .group_by_stable([col("document_index"), col("document")])
            .agg([len().alias("records")])
            .collect()
    }

    /// Add the records of one document, or apply `policy` if it has none.
    fn push_document(
        &mut self,
        document: &RawDocument,
        policy: BatchPolicy,
    ) -> Result<(), BatchError> {
        match document.extract() {
            Ok(records) => {
                debug!("{}: {} records", document.name, records.len());
                self.documents.push((document.name.clone(), records.len()));
                self.records.extend(records);
            }
            Err(source) => match policy {
                BatchPolicy::Abort => {
                    return Err(BatchError::Extract {
                        name: document.name.clone(),
                        source,
                    })
                }
                BatchPolicy::Skip => warn!("Skipping {}: {source}", document.name),
            },
        }
        Ok(())
    }

    fn finish(self) -> Result<Self, BatchError> {
        if self.records.is_empty() {
            return Err(BatchError::Empty);
        }
        Ok(self)
    }
}

/// Read and extract files one at a time, in the given order.
///
/// Each file is fully read and extracted before the next one is opened, so the
/// first failing file decides the error. Read failures always abort.
pub async fn load_batch(paths: &[PathBuf], policy: BatchPolicy) -> Result<Batch, BatchError> {
    let mut batch = Batch::default();
    for path in paths {
        let document = RawDocument::read(path).await?;
        debug!("Read {} ({} bytes)", document.name, document.text.len());
        batch.push_document(&document, policy)?;
    }
    batch.finish()
}

/// Extract every queued document in order and concatenate the records.
pub fn collect_records(queue: &UploadQueue, policy: BatchPolicy) -> Result<Batch, BatchError> {
    let mut batch = Batch::default();
    for document in queue.iter() {
        batch.push_document(document, policy)?;
    }
    batch.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExtractError;

    fn queue(docs: &[(&str, &str)]) -> UploadQueue {
        let mut q = UploadQueue::new();
        for (name, text) in docs {
            q.add(RawDocument::new(*name, *text));
        }
        q
    }

    #[test]
    fn records_concatenated_in_upload_order() {
        let q = queue(&[("a.csv", "A;B\nC;D"), ("b.csv", "protein,ligand\nE,F")]);
        let batch = collect_records(&q, BatchPolicy::Abort).unwrap();
        let proteins: Vec<&str> = batch
            .records()
            .iter()
            .map(|r| r.protein_sequence.as_str())
            .collect();
        assert_eq!(proteins, vec!["A", "C", "E"]);
        assert_eq!(
            batch.documents(),
            &[("a.csv".to_string(), 2), ("b.csv".to_string(), 1)]
        );
    }

    #[test]
    fn abort_on_first_bad_document() {
        let q = queue(&[("a.csv", "A,B"), ("empty.csv", "  \n"), ("c.csv", ",")]);
        let err = collect_records(&q, BatchPolicy::Abort).unwrap_err();
        assert!(matches!(
            err,
            BatchError::Extract { ref name, source: ExtractError::EmptyInput } if name == "empty.csv"
        ));
        assert_eq!(err.to_string(), "empty.csv: CSV file is empty");
    }

    #[test]
    fn skip_bad_documents() {
        let q = queue(&[("a.csv", ",\n,"), ("b.csv", "A,B")]);
        let batch = collect_records(&q, BatchPolicy::Skip).unwrap();
        assert_eq!(batch.records().len(), 1);
        assert_eq!(batch.documents().len(), 1);

        let q = queue(&[("a.csv", ""), ("b.csv", "x,\n")]);
        assert!(matches!(
            collect_records(&q, BatchPolicy::Skip),
            Err(BatchError::Empty)
        ));
        assert!(matches!(
            collect_records(&UploadQueue::new(), BatchPolicy::Abort),
            Err(BatchError::Empty)
        ));
    }

    #[test]
    fn dataframe_columns_and_summary() {
        let q = queue(&[("a.csv", "A,B\nC,D"), ("b.csv", "E\tF")]);
        let batch = collect_records(&q, BatchPolicy::Abort).unwrap();

        let df = batch.to_dataframe().unwrap();
        assert_eq!(df.height(), 3);
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            columns,
            vec!["document_index", "document", "protein_sequence", "ligand_smiles"]
        );

        let summary = batch.summary().unwrap();
        assert_eq!(summary.height(), 2);
        let counts: Vec<u32> = summary
            .column("records")
            .unwrap()
            .u32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn summary_keeps_documents_with_same_name_apart() {
        let q = queue(&[
            ("pairs.csv", "A,B\nC,D"),
            ("pairs.csv", "E,F"),
            ("other.csv", "G,H"),
        ]);
        let batch = collect_records(&q, BatchPolicy::Abort).unwrap();
        assert_eq!(batch.documents().len(), 3);

        let summary = batch.summary().unwrap();
        assert_eq!(summary.height(), batch.documents().len());
        let names: Vec<&str> = summary
            .column("document")
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(names, vec!["pairs.csv", "pairs.csv", "other.csv"]);
        let counts: Vec<u32> = summary
            .column("records")
            .unwrap()
            .u32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(counts, vec![2, 1, 1]);
    }

    fn fixture(name: &str) -> PathBuf {
        let root = env!("CARGO_MANIFEST_DIR");
        PathBuf::from(format!("{}/test-data/{}", root, name))
    }

    #[tokio::test]
    async fn fixtures_from_disk() {
        let paths = vec![
            fixture("header.csv"),
            fixture("semicolon.csv"),
            fixture("tabbed.tsv"),
        ];
        let batch = load_batch(&paths, BatchPolicy::Abort).await.unwrap();
        assert_eq!(batch.records().len(), 2 + 3 + 1);
        assert_eq!(batch.records()[0].ligand_smiles, "CC(=O)O");

        let paths = vec![fixture("header.csv"), fixture("no_rows.csv")];
        assert!(matches!(
            load_batch(&paths, BatchPolicy::Abort).await,
            Err(BatchError::Extract {
                source: ExtractError::NoValidRows,
                ..
            })
        ));

        let paths = vec![fixture("blank.csv")];
        assert!(matches!(
            load_batch(&paths, BatchPolicy::Abort).await,
            Err(BatchError::Extract {
                source: ExtractError::EmptyInput,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn first_failing_file_decides_the_error() {
        // The bad first file is extracted before the missing second one is opened
        let paths = vec![fixture("no_rows.csv"), fixture("missing.csv")];
        let err = load_batch(&paths, BatchPolicy::Abort).await.unwrap_err();
        assert!(matches!(
            err,
            BatchError::Extract { ref name, source: ExtractError::NoValidRows } if name == "no_rows.csv"
        ));

        // Skipping the bad file moves on to the read failure
        let err = load_batch(&paths, BatchPolicy::Skip).await.unwrap_err();
        assert!(matches!(err, BatchError::Read { ref name, .. } if name == "missing.csv"));

        let paths = vec![fixture("no_rows.csv"), fixture("semicolon.csv")];
        let batch = load_batch(&paths, BatchPolicy::Skip).await.unwrap();
        assert_eq!(batch.documents(), &[("semicolon.csv".to_string(), 3)]);
    }
}
