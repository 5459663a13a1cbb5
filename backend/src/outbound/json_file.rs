//! Startup loader for the contacts JSON file.
//!
//! The file holds an array of contact objects and is read exactly once when
//! the process starts. Nothing is written back.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;

use crate::domain::{Contact, ContactId};

/// Errors that prevent the contacts file from being loaded.
///
/// All of them are fatal: the server does not start without its data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read contacts file at {path}: {source}")]
    Read {
        /// Path to the contacts file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is not a JSON array of contacts.
    #[error("failed to parse contacts file at {path}: {source}")]
    Parse {
        /// Path to the contacts file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A record carries the reserved identifier `0`.
    #[error("contact at index {index} has no id")]
    UnassignedId {
        /// Position of the record in the array.
        index: usize,
    },
    /// Two records share an identifier.
    #[error("duplicate contact id {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: ContactId,
    },
}

/// Read and parse the contacts file at `path`.
///
/// # Errors
///
/// Returns [`LoadError`] when the file is unreadable, malformed, or holds
/// missing or repeated identifiers.
pub fn load_contacts(path: &Path) -> Result<Vec<Contact>, LoadError> {
    let payload = read_file(path)?;
    let contacts: Vec<Contact> =
        serde_json::from_slice(&payload).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    check_ids(&contacts)?;
    Ok(contacts)
}

fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    let read_error = |source: io::Error| LoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "contacts path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read(Path::new(file_name)).map_err(read_error)
}

fn check_ids(contacts: &[Contact]) -> Result<(), LoadError> {
    let mut seen = HashSet::with_capacity(contacts.len());
    for (index, contact) in contacts.iter().enumerate() {
        if contact.id.is_unassigned() {
            return Err(LoadError::UnassignedId { index });
        }
        if !seen.insert(contact.id) {
            return Err(LoadError::DuplicateId { id: contact.id });
        }
    }
    Ok(())
}
