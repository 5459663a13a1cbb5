//! HTTP inbound adapter serving the server-rendered contact pages.

pub mod contacts;
pub mod error;
pub mod flash;
pub mod forms;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use contacts::configure;
pub use error::ApiResult;
