//! Contact manager library: domain rules, the in-memory store, and the
//! server-rendered HTTP adapter.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;
