//! Document store service
//!
//! Reads and writes trees as block-style YAML documents.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, DocumentIo, DocumentIoExt};
use crate::domain::{from_document, to_document, Node};
use crate::infrastructure::traits::FileSystem;

/// Service for loading and saving tree documents.
pub struct DocumentService {
    fs: Arc<dyn FileSystem>,
}

impl DocumentService {
    /// Create a new document service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Serialize a tree to YAML text.
    ///
    /// Keys keep the order `value, left, right`. An absent root is written
    /// as `null`.
    pub fn render<V: Serialize>(&self, root: Option<&Node<V>>) -> ApplicationResult<String> {
        let doc = to_document(root)?;
        serde_yaml::to_string(&doc).map_err(|e| ApplicationError::OperationFailed {
            context: "serialize document".to_string(),
            source: Box::new(e),
        })
    }

    /// Write a tree to `destination`, creating parent directories.
    #[instrument(level = "debug", skip(self, root))]
    pub fn write<V: Serialize>(
        &self,
        root: Option<&Node<V>>,
        destination: &Path,
    ) -> ApplicationResult<()> {
        let content = self.render(root)?;
        self.fs
            .ensure_parent(destination)
            .on_document(DocumentIo::CreateParent, destination)?;
        self.fs
            .write(destination, &content)
            .on_document(DocumentIo::Write, destination)?;
        debug!("wrote {} bytes", content.len());
        Ok(())
    }

    /// Whether a document already exists at `path`.
    pub fn exists(&self, path: &Path) -> bool {
        self.fs.exists(path)
    }

    /// Parse YAML text into a tree; `None` for an empty or `null` document.
    pub fn parse<V: DeserializeOwned>(
        &self,
        content: &str,
        source: &Path,
    ) -> ApplicationResult<Option<Node<V>>> {
        if content.trim().is_empty() {
            return Ok(None);
        }
        let doc: Value =
            serde_yaml::from_str(content).map_err(|e| ApplicationError::DocumentParse {
                path: source.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(from_document(Some(&doc)))
    }

    /// Read a tree from `source`.
    ///
    /// # Errors
    ///
    /// `DocumentNotFound` if the source does not exist, `DocumentParse` if it
    /// is not valid YAML.
    #[instrument(level = "debug", skip(self))]
    pub fn read<V: DeserializeOwned>(&self, source: &Path) -> ApplicationResult<Option<Node<V>>> {
        let content = self
            .fs
            .read_to_string(source)
            .on_document(DocumentIo::Read, source)?;
        let root = self.parse(&content, source)?;
        debug!(found = root.is_some(), "read document");
        Ok(root)
    }
}
