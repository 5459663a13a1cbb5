//! Outbound adapters.
//!
//! - `json_file`: one-shot loader for the contacts JSON file.
//! - `memory`: the in-memory [`ContactStore`](crate::domain::ContactStore).

pub mod json_file;
pub mod memory;

pub use json_file::{LoadError, load_contacts};
pub use memory::InMemoryContactStore;
