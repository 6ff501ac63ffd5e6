//! Annotation wrappers.
//!
//! Each wrapper owns the error it wraps, adds exactly one piece of metadata,
//! and reports the wrapped error through [`Error::source`]. Wrappers nest in
//! any order, around each other or around a plain error.
//!
//! # Rendering
//!
//! `Display` renders the wrapper's own contribution followed by the wrapped
//! error's description:
//!
//! | wrapper            | output                              |
//! |--------------------|-------------------------------------|
//! | `WithHumanMessage` | `{message}: {inner}`                |
//! | `WithErrorCode`    | `error code {code} : {inner}`       |
//! | `WithHttpStatus`   | `http status {status} : {inner}`    |
//! | `WithTags`         | `{inner}`                           |
//!
//! The alternate flag (`{:#}`) is the verbose form: the wrapped error is
//! written verbose first, then a newline, then the wrapper's short form. The
//! result is one line per link, innermost first.
//!
//! # Absent errors
//!
//! The free constructors take an `Option` and map over it, so wrapping
//! `None` yields `None` without allocating.

use crate::capability::{ErrorCode, HttpStatus, HumanMessage, Tagged};
use crate::chain::BoxError;
use crate::tags::{TagValue, Tags};
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use zeroize::Zeroize;

/// Write `prefix` then `inner`, honoring the verbose flag.
pub(crate) fn render(
    f: &mut fmt::Formatter<'_>,
    prefix: Option<fmt::Arguments<'_>>,
    inner: &(dyn Error + 'static),
) -> fmt::Result {
    if f.alternate() {
        writeln!(f, "{inner:#}")?;
    }
    if let Some(prefix) = prefix {
        f.write_fmt(prefix)?;
    }
    write!(f, "{inner}")
}

// ============================================================================
// Human Message
// ============================================================================

/// Wraps an error with a message intended for end users.
#[derive(Debug)]
pub struct WithHumanMessage {
    message: Cow<'static, str>,
    source: BoxError,
}

impl WithHumanMessage {
    /// Wrap `source` with `message`.
    #[inline]
    pub fn new(source: impl Into<BoxError>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
            source: source.into(),
        }
    }

    /// The message shown to end users.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl HumanMessage for WithHumanMessage {
    #[inline]
    fn human_message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for WithHumanMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, Some(format_args!("{}: ", self.message)), &*self.source)
    }
}

impl Error for WithHumanMessage {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

impl Drop for WithHumanMessage {
    fn drop(&mut self) {
        if let Cow::Owned(ref mut s) = self.message {
            s.zeroize();
        }
    }
}

/// Wrap `err` with a message intended for end users.
///
/// ```rust
/// use annotated_errors::{human_message, with_human_message};
/// use std::io;
///
/// let err = with_human_message(Some(io::Error::other("db down")), "Try again later");
/// assert_eq!(human_message(err.as_ref()), "Try again later");
/// assert_eq!(err.map(|e| e.to_string()).as_deref(), Some("Try again later: db down"));
/// ```
pub fn with_human_message<E>(
    err: Option<E>,
    message: impl Into<Cow<'static, str>>,
) -> Option<WithHumanMessage>
where
    E: Into<BoxError>,
{
    err.map(|err| WithHumanMessage::new(err, message))
}

// ============================================================================
// Error Code
// ============================================================================

/// Wraps an error with a numeric error code for machines.
#[derive(Debug)]
pub struct WithErrorCode {
    code: i64,
    source: BoxError,
}

impl WithErrorCode {
    /// Wrap `source` with `code`.
    #[inline]
    pub fn new(source: impl Into<BoxError>, code: i64) -> Self {
        Self {
            code,
            source: source.into(),
        }
    }

    /// The attached code.
    #[inline]
    pub const fn code(&self) -> i64 {
        self.code
    }
}

impl ErrorCode for WithErrorCode {
    #[inline]
    fn error_code(&self) -> i64 {
        self.code
    }
}

impl fmt::Display for WithErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, Some(format_args!("error code {} : ", self.code)), &*self.source)
    }
}

impl Error for WithErrorCode {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

/// Wrap `err` with an error code.
pub fn with_error_code<E>(err: Option<E>, code: i64) -> Option<WithErrorCode>
where
    E: Into<BoxError>,
{
    err.map(|err| WithErrorCode::new(err, code))
}

// ============================================================================
// HTTP Status
// ============================================================================

/// Wraps an error with an HTTP status code.
#[derive(Debug)]
pub struct WithHttpStatus {
    status: u16,
    source: BoxError,
}

impl WithHttpStatus {
    /// Wrap `source` with `status`.
    #[inline]
    pub fn new(source: impl Into<BoxError>, status: u16) -> Self {
        Self {
            status,
            source: source.into(),
        }
    }

    /// The attached status.
    #[inline]
    pub const fn status(&self) -> u16 {
        self.status
    }
}

impl HttpStatus for WithHttpStatus {
    #[inline]
    fn http_status(&self) -> u16 {
        self.status
    }
}

impl fmt::Display for WithHttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, Some(format_args!("http status {} : ", self.status)), &*self.source)
    }
}

impl Error for WithHttpStatus {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

/// Wrap `err` with an HTTP status code.
pub fn with_http_status<E>(err: Option<E>, status: u16) -> Option<WithHttpStatus>
where
    E: Into<BoxError>,
{
    err.map(|err| WithHttpStatus::new(err, status))
}

// ============================================================================
// Tags
// ============================================================================

/// Wraps an error with key/value tags. Silent: renders exactly as the
/// wrapped error does.
#[derive(Debug)]
pub struct WithTags {
    tags: Tags,
    source: BoxError,
}

impl WithTags {
    /// Wrap `source` with `tags`.
    #[inline]
    pub fn new(source: impl Into<BoxError>, tags: impl Into<Tags>) -> Self {
        Self {
            tags: tags.into(),
            source: source.into(),
        }
    }

    /// The tag list this link carries.
    #[inline]
    pub fn entries(&self) -> &Tags {
        &self.tags
    }
}

impl Tagged for WithTags {
    #[inline]
    fn tags(&self) -> &[TagValue] {
        self.tags.as_slice()
    }
}

impl fmt::Display for WithTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, None, &*self.source)
    }
}

impl Error for WithTags {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

/// Wrap `err` with key/value tags.
///
/// ```rust
/// use annotated_errors::{tag_map, tags, with_tags};
/// use std::io;
///
/// let err = with_tags(Some(io::Error::other("no rows")), tags!["user_id", 2]);
/// assert_eq!(tag_map(err.as_ref()).get("user_id").and_then(|v| v.as_i64()), Some(2));
/// ```
pub fn with_tags<E>(err: Option<E>, tags: impl Into<Tags>) -> Option<WithTags>
where
    E: Into<BoxError>,
{
    err.map(|err| WithTags::new(err, tags))
}
