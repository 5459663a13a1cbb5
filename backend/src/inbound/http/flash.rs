//! One-shot flash messages carried in a client-side cookie.
//!
//! The `messages` cookie holds URL-safe base64 of a JSON array whose
//! entries are each standard base64 of one message's UTF-8 bytes. Mutating endpoints append to it right before redirecting; the next page
//! render reads the list and answers with a removal cookie so each message
//! is shown once. There is no server-side state, and the cookie is neither
//! signed nor encrypted: it only ever carries UI notices.

use std::sync::Arc;

use actix_web::HttpRequest;
use actix_web::cookie::time::{Duration, OffsetDateTime};
use actix_web::cookie::{Cookie, SameSite};
use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use mockable::Clock;
use tracing::debug;

/// Name of the cookie carrying pending messages.
pub const FLASH_COOKIE: &str = "messages";

/// Lifetime of an unread flash cookie.
pub const FLASH_TTL_HOURS: i64 = 24;

/// Errors raised while writing the flash cookie.
#[derive(Debug, thiserror::Error)]
pub enum FlashError {
    /// The message list could not be serialised.
    #[error("failed to encode flash messages: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Encode `messages` into a cookie value.
///
/// # Errors
///
/// Returns [`FlashError::Encode`] when JSON serialisation fails.
pub fn encode_messages(messages: &[String]) -> Result<String, FlashError> {
    let entries: Vec<String> = messages
        .iter()
        .map(|message| STANDARD.encode(message))
        .collect();
    let json = serde_json::to_vec(&entries)?;
    Ok(URL_SAFE.encode(json))
}

/// Decode a cookie value into messages.
///
/// Anything that is not a base64-wrapped JSON array of base64 strings
/// decodes to an empty list. Invalid UTF-8 inside a message is replaced
/// rather than rejected.
pub fn decode_messages(raw: &str) -> Vec<String> {
    let Ok(json) = URL_SAFE.decode(raw) else {
        debug!("ignoring flash cookie with invalid base64");
        return Vec::new();
    };
    let entries: Vec<String> = match serde_json::from_slice(&json) {
        Ok(entries) => entries,
        Err(error) => {
            debug!(%error, "ignoring flash cookie with invalid JSON");
            return Vec::new();
        }
    };
    entries
        .iter()
        .map(|entry| {
            STANDARD
                .decode(entry)
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        })
        .collect::<Result<_, _>>()
        .unwrap_or_else(|error| {
            debug!(%error, "ignoring flash cookie with invalid message encoding");
            Vec::new()
        })
}

/// Messages read from a request, plus the cookie that clears them.
#[derive(Debug, Default)]
pub struct TakenMessages {
    /// Pending messages in the order they were set.
    pub messages: Vec<String>,
    /// Removal cookie to attach to the response; `None` when nothing was
    /// pending.
    pub clear_cookie: Option<Cookie<'static>>,
}

/// Reads and writes the flash cookie.
#[derive(Clone)]
pub struct Flash {
    clock: Arc<dyn Clock + Send + Sync>,
    cookie_secure: bool,
}

impl Flash {
    /// Build a flash helper using `clock` for cookie expiry.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>, cookie_secure: bool) -> Self {
        Self {
            clock,
            cookie_secure,
        }
    }

    /// Messages currently pending on `req`.
    pub fn pending(req: &HttpRequest) -> Vec<String> {
        req.cookie(FLASH_COOKIE)
            .map(|cookie| decode_messages(cookie.value()))
            .unwrap_or_default()
    }

    /// Append `message` to the request's pending list and return the
    /// replacement cookie, valid for [`FLASH_TTL_HOURS`].
    ///
    /// # Errors
    ///
    /// Returns [`FlashError`] when the list cannot be encoded.
    pub fn set(&self, req: &HttpRequest, message: &str) -> Result<Cookie<'static>, FlashError> {
        let mut messages = Self::pending(req);
        messages.push(message.to_owned());
        let value = encode_messages(&messages)?;

        let ttl = Duration::hours(FLASH_TTL_HOURS);
        let mut cookie = Cookie::build(FLASH_COOKIE, value)
            .path("/")
            .http_only(true)
            .secure(self.cookie_secure)
            .same_site(SameSite::Lax)
            .max_age(ttl)
            .finish();
        if let Some(expires) = self.expiry(ttl) {
            cookie.set_expires(expires);
        }
        Ok(cookie)
    }

    /// Read the pending messages and, when there are any, produce the
    /// cookie that removes them from the client.
    pub fn take(&self, req: &HttpRequest) -> TakenMessages {
        let messages = Self::pending(req);
        if messages.is_empty() {
            return TakenMessages::default();
        }

        let cookie = Cookie::build(FLASH_COOKIE, "")
            .path("/")
            .http_only(true)
            .secure(self.cookie_secure)
            .same_site(SameSite::Lax)
            .max_age(Duration::ZERO)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .finish();
        TakenMessages {
            messages,
            clear_cookie: Some(cookie),
        }
    }

    fn expiry(&self, ttl: Duration) -> Option<OffsetDateTime> {
        let now = OffsetDateTime::from_unix_timestamp(self.clock.utc().timestamp()).ok()?;
        now.checked_add(ttl)
    }
}
