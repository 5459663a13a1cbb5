//! Offset pagination primitives for listing endpoints.
//!
//! Listings are addressed by a 1-based [`PageNumber`] and a fixed
//! [`PageSize`]. [`paginate`] cuts the requested window out of a slice and
//! reports whether any record lies beyond it, which is all a "previous /
//! next" style navigation needs.
//!
//! # Example
//!
//! ```
//! use pagination::{PageNumber, PageSize, paginate};
//!
//! let records: Vec<u32> = (1..=12).collect();
//! let size = PageSize::new(5).expect("non-zero page size");
//!
//! let first = paginate(&records, PageNumber::FIRST, size);
//! assert_eq!(first.items(), &[1, 2, 3, 4, 5]);
//! assert!(first.has_next());
//!
//! let last = paginate(&records, PageNumber::new(3).expect("page"), size);
//! assert_eq!(last.items(), &[11, 12]);
//! assert!(!last.has_next());
//! ```

use std::fmt;
use std::num::NonZeroUsize;

use thiserror::Error;

/// Errors raised when constructing pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Page sizes must hold at least one record.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    /// Page numbers are 1-based.
    #[error("page number must be at least 1")]
    ZeroPageNumber,
}

/// Number of records shown per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Page size used when nothing else is configured.
    pub const DEFAULT: Self = match NonZeroUsize::new(5) {
        Some(size) => Self(size),
        None => Self(NonZeroUsize::MIN),
    };

    /// Validate and construct a page size.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] when `size` is zero.
    pub const fn new(size: usize) -> Result<Self, PaginationError> {
        match NonZeroUsize::new(size) {
            Some(size) => Ok(Self(size)),
            None => Err(PaginationError::ZeroPageSize),
        }
    }

    /// Raw record count.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based page index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroUsize);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// Validate and construct a page number.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageNumber`] when `number` is zero.
    pub const fn new(number: usize) -> Result<Self, PaginationError> {
        match NonZeroUsize::new(number) {
            Some(number) => Ok(Self(number)),
            None => Err(PaginationError::ZeroPageNumber),
        }
    }

    /// Interpret a raw query-string value, falling back to the first page.
    ///
    /// Listings never reject a bad `page` parameter: missing, non-numeric,
    /// negative and zero values all address page 1.
    ///
    /// ```
    /// use pagination::PageNumber;
    ///
    /// assert_eq!(PageNumber::from_query(Some("3")).get(), 3);
    /// assert_eq!(PageNumber::from_query(Some("abc")), PageNumber::FIRST);
    /// assert_eq!(PageNumber::from_query(None), PageNumber::FIRST);
    /// ```
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<usize>().ok())
            .and_then(|value| Self::new(value).ok())
            .unwrap_or(Self::FIRST)
    }

    /// Raw 1-based index.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// The page after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The page before this one, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match NonZeroUsize::new(self.0.get() - 1) {
            Some(number) => Some(Self(number)),
            None => None,
        }
    }

    const fn offset(self, size: PageSize) -> usize {
        (self.0.get() - 1).saturating_mul(size.get())
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One window of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    number: PageNumber,
    has_next: bool,
}

impl<T> Page<T> {
    /// Wrap a complete, unpaginated listing as a single first page.
    #[must_use]
    pub const fn unpaginated(items: Vec<T>) -> Self {
        Self {
            items,
            number: PageNumber::FIRST,
            has_next: false,
        }
    }

    /// Records on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its records.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Page index this window was cut at.
    #[must_use]
    pub const fn number(&self) -> PageNumber {
        self.number
    }

    /// Whether at least one record exists beyond this page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Whether a page precedes this one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number.previous().is_some()
    }

    /// Number of records on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cut page `number` of `size` records out of `records`.
///
/// Pages past the end are empty rather than an error.
#[must_use]
pub fn paginate<T: Clone>(records: &[T], number: PageNumber, size: PageSize) -> Page<T> {
    let Some(rest) = records.get(number.offset(size)..) else {
        return Page {
            items: Vec::new(),
            number,
            has_next: false,
        };
    };

    Page {
        items: rest.iter().take(size.get()).cloned().collect(),
        number,
        has_next: rest.len() > size.get(),
    }
}
