//! In-memory contact store.
//!
//! The whole address book lives in a `Vec` behind an [`RwLock`]. Reads share
//! the lock; `save`, `update` and `delete` take it exclusively so validation
//! and mutation happen as one step.

use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use pagination::{Page, PageNumber, paginate};
use tracing::{debug, info};

use crate::domain::{
    Contact, ContactId, ContactNotFound, ContactStore, SaveError, StoreSettings, ValidationErrors,
    validate,
};
use crate::outbound::json_file::{LoadError, load_contacts};

#[derive(Debug)]
struct Book {
    contacts: Vec<Contact>,
    /// Highest identifier ever held; new contacts continue from here so ids
    /// removed by `delete` are never handed out again.
    last_id: ContactId,
}

impl Book {
    fn new(contacts: Vec<Contact>) -> Self {
        let last_id = contacts
            .iter()
            .map(|contact| contact.id)
            .max()
            .unwrap_or(ContactId::UNASSIGNED);
        Self { contacts, last_id }
    }

    fn position(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|contact| contact.id == id)
    }

    /// Replace the record at `index`, or append when there is none.
    fn put(&mut self, contact: Contact, index: Option<usize>) -> Contact {
        self.last_id = self.last_id.max(contact.id);
        match index.and_then(|index| self.contacts.get_mut(index)) {
            Some(slot) => {
                *slot = contact.clone();
                info!(id = %contact.id, "contact updated");
            }
            None => {
                self.contacts.push(contact.clone());
                info!(id = %contact.id, "contact created");
            }
        }
        contact
    }
}

/// [`ContactStore`] backed by process memory.
#[derive(Debug)]
pub struct InMemoryContactStore {
    book: RwLock<Book>,
    settings: StoreSettings,
}

impl InMemoryContactStore {
    /// Build a store over `contacts`, kept in the given order.
    pub fn new(contacts: Vec<Contact>, settings: StoreSettings) -> Self {
        Self {
            book: RwLock::new(Book::new(contacts)),
            settings,
        }
    }

    /// Load the store from the JSON file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the file cannot be read or parsed.
    pub fn load(path: &Path, settings: StoreSettings) -> Result<Self, LoadError> {
        let contacts = load_contacts(path)?;
        info!(
            path = %path.display(),
            count = contacts.len(),
            "contacts loaded"
        );
        Ok(Self::new(contacts, settings))
    }

    // Every mutation is a single assignment or Vec operation, so the data is
    // consistent even when a panicking thread poisoned the lock.
    fn read(&self) -> RwLockReadGuard<'_, Book> {
        self.book.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Book> {
        self.book.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self, book: &Book, candidate: &Contact) -> Result<(), SaveError> {
        let errors = validate(candidate, &book.contacts, self.settings.strictness());
        if errors.is_empty() {
            return Ok(());
        }
        debug!(
            id = %candidate.id,
            fields = %errors,
            "contact rejected by validation"
        );
        Err(SaveError::Invalid(errors))
    }
}

impl ContactStore for InMemoryContactStore {
    fn all(&self, page: PageNumber) -> Page<Contact> {
        let book = self.read();
        match self.settings.page_size {
            Some(size) => paginate(&book.contacts, page, size),
            None => Page::unpaginated(book.contacts.clone()),
        }
    }

    fn search(&self, query: &str) -> Vec<Contact> {
        let needle = query.to_lowercase();
        self.read()
            .contacts
            .iter()
            .filter(|contact| contact.matches_lowercase(&needle))
            .cloned()
            .collect()
    }

    fn find(&self, id: ContactId) -> Result<Contact, ContactNotFound> {
        self.read()
            .contacts
            .iter()
            .find(|contact| contact.id == id)
            .cloned()
            .ok_or(ContactNotFound { id })
    }

    fn save(&self, candidate: &Contact) -> Result<Contact, SaveError> {
        let mut book = self.write();
        self.check(&book, candidate)?;

        let mut contact = candidate.clone();
        if contact.id.is_unassigned() {
            contact.id = book.last_id.successor().ok_or(SaveError::IdsExhausted)?;
        }
        let index = book.position(contact.id);
        Ok(book.put(contact, index))
    }

    fn update(&self, candidate: &Contact) -> Result<Contact, SaveError> {
        let mut book = self.write();
        let index = book
            .position(candidate.id)
            .ok_or(ContactNotFound { id: candidate.id })?;
        self.check(&book, candidate)?;
        Ok(book.put(candidate.clone(), Some(index)))
    }

    fn delete(&self, id: ContactId) -> Result<Contact, ContactNotFound> {
        let mut book = self.write();
        let index = book.position(id).ok_or(ContactNotFound { id })?;
        let removed = book.contacts.remove(index);
        info!(id = %id, "contact deleted");
        Ok(removed)
    }

    fn validate(&self, candidate: &Contact) -> ValidationErrors {
        validate(candidate, &self.read().contacts, self.settings.strictness())
    }

    fn len(&self) -> usize {
        self.read().contacts.len()
    }
}
