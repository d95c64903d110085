//! I/O error mapping for document reads and writes.

use std::fmt;
use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// The document I/O step an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentIo {
    Read,
    Write,
    CreateParent,
}

impl fmt::Display for DocumentIo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentIo::Read => write!(f, "read document"),
            DocumentIo::Write => write!(f, "write document"),
            DocumentIo::CreateParent => write!(f, "create parent directory"),
        }
    }
}

pub trait DocumentIoExt<T> {
    /// Maps an I/O failure of `step` on `path` into an application error.
    ///
    /// A read of a missing file is `DocumentNotFound`; everything else is
    /// `OperationFailed` carrying the step and path.
    fn on_document(self, step: DocumentIo, path: &Path) -> ApplicationResult<T>;
}

impl<T> DocumentIoExt<T> for io::Result<T> {
    fn on_document(self, step: DocumentIo, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| match (step, e.kind()) {
            (DocumentIo::Read, io::ErrorKind::NotFound) => {
                ApplicationError::DocumentNotFound(path.to_path_buf())
            }
            _ => ApplicationError::OperationFailed {
                context: format!("{}: {}", step, path.display()),
                source: Box::new(e),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
    }

    #[test]
    fn test_missing_file_on_read_is_document_not_found() {
        let err = not_found()
            .on_document(DocumentIo::Read, Path::new("t.yaml"))
            .unwrap_err();
        assert!(matches!(err, ApplicationError::DocumentNotFound(p) if p == Path::new("t.yaml")));
    }

    #[test]
    fn test_missing_directory_on_write_is_operation_failure() {
        let err = not_found()
            .on_document(DocumentIo::Write, Path::new("out/t.yaml"))
            .unwrap_err();
        assert_eq!(err.to_string(), "operation failed: write document: out/t.yaml");
    }

    #[test]
    fn test_success_passes_through() {
        let ok: io::Result<u8> = Ok(7);
        assert_eq!(ok.on_document(DocumentIo::Read, Path::new("x")).unwrap(), 7);
    }
}
