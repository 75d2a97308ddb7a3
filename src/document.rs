use crate::errors::{BatchError, ExtractError};
use crate::extract::{extract, Record};
use std::path::Path;

/// Decoded text content of one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub name: String,
    pub text: String,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Decode raw bytes as UTF-8, replacing invalid sequences and dropping a leading BOM.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        let text = text.strip_prefix('\u{feff}').unwrap_or(&*text);
        Self::new(name, text)
    }

    /// Read a file from disk. The document name is the file name.
    pub async fn read(path: &Path) -> Result<Self, BatchError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Self::from_bytes(name, &bytes)),
            Err(source) => Err(BatchError::Read { name, source }),
        }
    }

    pub fn extract(&self) -> Result<Vec<Record>, ExtractError> {
        extract(&self.text)
    }
}

/// Identifier handed out by [`UploadQueue::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub usize);

type ChangeCallback = Box<dyn FnMut(&[(DocumentId, RawDocument)]) + Send>;

/// Ordered list of uploaded documents.
///
/// An optional callback is notified with the full list after every change.
#[derive(Default)]
pub struct UploadQueue {
    documents: Vec<(DocumentId, RawDocument)>,
    next_id: usize,
    on_change: Option<ChangeCallback>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_change(
        mut self,
        callback: impl FnMut(&[(DocumentId, RawDocument)]) + Send + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn add(&mut self, document: RawDocument) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        self.documents.push((id, document));
        self.notify();
        id
    }

    pub fn remove(&mut self, id: DocumentId) -> Option<RawDocument> {
        let pos = self.documents.iter().position(|(i, _)| *i == id)?;
        let (_, document) = self.documents.remove(pos);
        self.notify();
        Some(document)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in upload order.
    pub fn iter(&self) -> impl Iterator<Item = &RawDocument> {
        self.documents.iter().map(|(_, d)| d)
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.documents);
        }
    }
}

impl std::fmt::Debug for UploadQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadQueue")
            .field("documents", &self.documents)
            .field("next_id", &self.next_id)
            .finish()
    }
}
