//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Contact, ContactId, StoreSettings};
use crate::outbound::InMemoryContactStore;

use super::state::HttpState;

/// Clock pinned to a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 2026-03-01T12:00:00Z.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// `count` valid contacts with ids `1..=count`.
pub fn sample_contacts(count: u64) -> Vec<Contact> {
    (1..=count)
        .map(|n| {
            Contact::draft(
                format!("First{n}"),
                format!("Last{n}"),
                "555-000-0000",
                format!("person{n}@example.com"),
            )
            .with_id(ContactId::new(n))
        })
        .collect()
}

/// Handler state over an in-memory store seeded with `contacts`.
pub fn test_state(contacts: Vec<Contact>) -> HttpState {
    let store = InMemoryContactStore::new(contacts, StoreSettings::default());
    HttpState::new(Arc::new(store), Arc::new(FixedClock(fixed_now())), false)
}
