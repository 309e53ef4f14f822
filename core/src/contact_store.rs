/// Contact storage: the ordered in-memory list, persisted on every change
use crate::error::{Result, SosError};
use crate::persistence::ContactPersistence;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub type ContactId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub icon: String,
}

/// Owner of the canonical contact list.
///
/// Each mutation updates the list and re-saves it while holding the lock, so
/// concurrent callers are serialized and `list()` always sees the latest
/// committed state.
pub struct ContactStore {
    contacts: Mutex<Vec<Contact>>,
    persistence: Box<dyn ContactPersistence>,
}

impl ContactStore {
    /// Load the baseline list once from `persistence`
    pub fn initialize(persistence: impl ContactPersistence + 'static) -> Self {
        let contacts = persistence.load();
        info!("Contact store initialized with {} contacts", contacts.len());
        Self {
            contacts: Mutex::new(contacts),
            persistence: Box::new(persistence),
        }
    }

    /// Append a new contact with the next id and persist.
    ///
    /// Refused with `IdsExhausted` when the highest id is already `i64::MAX`.
    pub fn add(&self, name: String, phone: String, icon: String) -> Result<Contact> {
        let mut contacts = self.contacts.lock();
        // Max-scan on every add: ids freed by deletes are never reused
        let max = contacts.iter().map(|c| c.id).max().unwrap_or(0);
        let Some(id) = max.checked_add(1) else {
            warn!("Cannot add contact: highest id {} leaves no room", max);
            return Err(SosError::IdsExhausted(max));
        };
        let contact = Contact {
            id,
            name,
            phone,
            icon,
        };
        contacts.push(contact.clone());
        self.persistence.save(&contacts);
        debug!("Added contact {}", id);
        Ok(contact)
    }

    /// Replace the fields of contact `id` in place. Returns false for an unknown id.
    pub fn update(&self, id: ContactId, name: String, phone: String, icon: String) -> bool {
        let mut contacts = self.contacts.lock();
        let Some(slot) = contacts.iter_mut().find(|c| c.id == id) else {
            debug!("Update of unknown contact {} ignored", id);
            return false;
        };
        *slot = Contact {
            id,
            name,
            phone,
            icon,
        };
        self.persistence.save(&contacts);
        debug!("Updated contact {}", id);
        true
    }

    /// Remove contact `id`. Returns false for an unknown id.
    pub fn remove(&self, id: ContactId) -> bool {
        let mut contacts = self.contacts.lock();
        let Some(index) = contacts.iter().position(|c| c.id == id) else {
            debug!("Removal of unknown contact {} ignored", id);
            return false;
        };
        contacts.remove(index);
        self.persistence.save(&contacts);
        debug!("Removed contact {}", id);
        true
    }

    /// Snapshot of the list in display order
    pub fn list(&self) -> Vec<Contact> {
        self.contacts.lock().clone()
    }

    pub fn get(&self, id: ContactId) -> Option<Contact> {
        self.contacts.lock().iter().find(|c| c.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.contacts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.lock().is_empty()
    }
}
