use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::DocumentStore;
use crate::errors::{Result, TinyLinkError};

/// One `<key>.json` file per document inside a data directory.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// reader never observes a half-written document.
pub struct FileDocumentStore {
    dir: PathBuf,
}

impl FileDocumentStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(TinyLinkError::storage(format!(
                "Invalid document key: {:?}",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl DocumentStore for FileDocumentStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => {
                trace!("Read document {} ({} bytes)", path.display(), content.len());
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Document {} does not exist yet", path.display());
                Ok(None)
            }
            Err(e) => Err(TinyLinkError::storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(TinyLinkError::storage(format!(
                "Failed to replace {}: {}",
                path.display(),
                e
            )));
        }
        trace!("Wrote document {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
