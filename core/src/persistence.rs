/// Contact persistence: the whole list as one JSON document on local disk
///
/// Every save rewrites the full document. Load and save never fail from the
/// caller's point of view: problems are logged and the in-memory list stays
/// authoritative.
use crate::contact_store::Contact;
use crate::config::CONTACTS_FILE_NAME;
use crate::error::{Result, SosError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const EMPTY_DOCUMENT: &str = "[]";

/// Load/save boundary used by the contact store
pub trait ContactPersistence: Send + Sync {
    /// Read the persisted list in document order; unreadable input yields an empty list
    fn load(&self) -> Vec<Contact>;

    /// Overwrite the persisted list; failures are logged and dropped
    fn save(&self, contacts: &[Contact]);
}

/// `contacts.json` gateway
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Gateway for `<data_dir>/contacts.json`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(CONTACTS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document.
    ///
    /// A blank file is an empty list. A missing file is an `Io` error.
    pub fn read_document(&self) -> Result<Vec<Contact>> {
        let raw = fs::read_to_string(&self.path).map_err(SosError::Io)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        let contacts: Vec<Contact> =
            serde_json::from_str(&raw).map_err(SosError::Serialization)?;
        Ok(contacts)
    }

    /// Serialize `contacts` and replace the document
    pub fn write_document(&self, contacts: &[Contact]) -> Result<()> {
        let json = serde_json::to_string_pretty(contacts).map_err(SosError::Serialization)?;
        self.write_raw(&json)
    }

    fn write_raw(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(SosError::Io)?;
            }
        }

        // Temp file + rename: a crash leaves either the old or the new document
        let tmp = self.temp_path();
        fs::write(&tmp, contents).map_err(SosError::Io)?;
        fs::rename(&tmp, &self.path).map_err(SosError::Io)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| CONTACTS_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ContactPersistence for JsonFileGateway {
    fn load(&self) -> Vec<Contact> {
        match self.read_document() {
            Ok(contacts) => {
                debug!("Loaded {} contacts from {:?}", contacts.len(), self.path);
                contacts
            }
            Err(SosError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                info!("No contacts file at {:?}, creating an empty one", self.path);
                if let Err(e) = self.write_raw(EMPTY_DOCUMENT) {
                    warn!("Failed to create contacts file {:?}: {}", self.path, e);
                }
                Vec::new()
            }
            Err(e) => {
                // Left on disk as-is; the next save replaces it
                warn!("Ignoring unreadable contacts file {:?}: {}", self.path, e);
                Vec::new()
            }
        }
    }

    fn save(&self, contacts: &[Contact]) {
        match self.write_document(contacts) {
            Ok(()) => debug!("Saved {} contacts to {:?}", contacts.len(), self.path),
            Err(e) => warn!("Failed to save contacts to {:?}: {}", self.path, e),
        }
    }
}
