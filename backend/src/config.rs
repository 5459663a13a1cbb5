//! Environment-driven application settings.
//!
//! Every toggle has a development-friendly default; `cargo run` from the
//! workspace root picks up the bundled `contacts.json` there. Values that
//! are present but malformed are rejected rather than silently replaced.

use std::net::SocketAddr;
use std::path::PathBuf;

use mockable::Env;
use pagination::PageSize;

use crate::domain::StoreSettings;

/// Path of the contacts JSON file.
pub const CONTACTS_FILE_ENV: &str = "CONTACTS_FILE";
/// Listing page size; `0`, `off` or `none` disables pagination.
pub const PAGE_SIZE_ENV: &str = "CONTACTS_PAGE_SIZE";
/// Whether the strict validation rule set applies.
pub const STRICT_VALIDATION_ENV: &str = "CONTACTS_STRICT_VALIDATION";
/// Socket address the server binds to.
pub const BIND_ADDR_ENV: &str = "CONTACTS_BIND_ADDR";
/// Whether the flash cookie carries the `Secure` attribute.
pub const COOKIE_SECURE_ENV: &str = "CONTACTS_COOKIE_SECURE";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const PAGE_SIZE_EXPECTED: &str = "a non-negative integer or off|none";
const BIND_ADDR_EXPECTED: &str = "a socket address such as 127.0.0.1:3000";

/// Errors raised while reading settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Raw value found.
        value: String,
        /// Accepted forms.
        expected: &'static str,
    },
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Contacts JSON file loaded at startup.
    pub contacts_file: PathBuf,
    /// Store behaviour toggles.
    pub store: StoreSettings,
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// `Secure` attribute for the flash cookie.
    pub cookie_secure: bool,
}

/// Contacts file read when [`CONTACTS_FILE_ENV`] is unset, relative to the
/// working directory.
pub const DEFAULT_CONTACTS_FILE: &str = "contacts.json";

/// Default contacts file as a path.
pub fn default_contacts_file() -> PathBuf {
    PathBuf::from(DEFAULT_CONTACTS_FILE)
}

impl AppSettings {
    /// Build settings from environment variables.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use contacts::config::AppSettings;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "CONTACTS_PAGE_SIZE" => Some("off".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = AppSettings::from_env(&env).expect("valid settings");
    /// assert!(settings.store.page_size.is_none());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for malformed values.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let contacts_file = env
            .string(CONTACTS_FILE_ENV)
            .map_or_else(default_contacts_file, PathBuf::from);
        let page_size = page_size_from_env(env)?;
        let strict_validation = bool_from_env(env, STRICT_VALIDATION_ENV, true)?;
        let bind_addr = bind_addr_from_env(env)?;
        let cookie_secure = bool_from_env(env, COOKIE_SECURE_ENV, false)?;

        Ok(Self {
            contacts_file,
            store: StoreSettings {
                page_size,
                strict_validation,
            },
            bind_addr,
            cookie_secure,
        })
    }
}

fn page_size_from_env<E: Env>(env: &E) -> Result<Option<PageSize>, ConfigError> {
    let Some(value) = env.string(PAGE_SIZE_ENV) else {
        return Ok(Some(PageSize::DEFAULT));
    };

    let trimmed = value.trim().to_ascii_lowercase();
    if matches!(trimmed.as_str(), "off" | "none") {
        return Ok(None);
    }
    match trimmed.parse::<usize>() {
        Ok(size) => Ok(PageSize::new(size).ok()),
        Err(_) => Err(ConfigError::InvalidEnv {
            name: PAGE_SIZE_ENV,
            value,
            expected: PAGE_SIZE_EXPECTED,
        }),
    }
}

fn bind_addr_from_env<E: Env>(env: &E) -> Result<SocketAddr, ConfigError> {
    let value = env
        .string(BIND_ADDR_ENV)
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    let parsed = value.trim().parse::<SocketAddr>();
    match parsed {
        Ok(addr) => Ok(addr),
        Err(_) => Err(ConfigError::InvalidEnv {
            name: BIND_ADDR_ENV,
            value,
            expected: BIND_ADDR_EXPECTED,
        }),
    }
}

fn bool_from_env<E: Env>(
    env: &E,
    name: &'static str,
    default: bool,
) -> Result<bool, ConfigError> {
    match env.string(name) {
        Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidEnv {
            name,
            value,
            expected: BOOL_EXPECTED,
        }),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
