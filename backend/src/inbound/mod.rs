//! Inbound adapters that translate external requests into contact store
//! calls while keeping framework details at the edge.

pub mod http;
