//! Annotating `Result`s in place.
//!
//! `Ok` plays the part of the absent error: it passes through untouched and
//! nothing is allocated. Only `Err` values are wrapped.
//!
//! ```rust
//! use annotated_errors::{BoxError, ResultExt, error_code, http_status, human_message};
//! use std::io;
//!
//! fn find_user(id: u64) -> Result<String, io::Error> {
//!     Err(io::Error::new(io::ErrorKind::NotFound, format!("no rows for {id}")))
//! }
//!
//! fn handle(id: u64) -> Result<String, BoxError> {
//!     let user = find_user(id)
//!         .with_tags(annotated_errors::tags!["user_id", id])
//!         .with_error_code(1)
//!         .with_http_status(404)
//!         .with_human_message("Sorry, we couldn't find that user")?;
//!     Ok(user)
//! }
//!
//! let err = handle(2).unwrap_err();
//! assert_eq!(http_status(err.as_ref()), 404);
//! assert_eq!(error_code(err.as_ref()), 1);
//! assert_eq!(human_message(err.as_ref()), "Sorry, we couldn't find that user");
//! ```

use crate::chain::BoxError;
use crate::named::Named;
use crate::tags::Tags;
use crate::wrappers::{WithErrorCode, WithHttpStatus, WithHumanMessage, WithTags};
use std::borrow::Cow;

/// Extension methods wrapping the error of a `Result`.
pub trait ResultExt<T> {
    /// Wrap the error with a message intended for end users.
    fn with_human_message(
        self,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<T, WithHumanMessage>;

    /// Wrap the error with an error code.
    fn with_error_code(self, code: i64) -> Result<T, WithErrorCode>;

    /// Wrap the error with an HTTP status code.
    fn with_http_status(self, status: u16) -> Result<T, WithHttpStatus>;

    /// Wrap the error with key/value tags.
    fn with_tags(self, tags: impl Into<Tags>) -> Result<T, WithTags>;

    /// Wrap the error in a named link with tags.
    fn named(self, name: impl Into<Cow<'static, str>>, tags: impl Into<Tags>)
    -> Result<T, Named>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[inline]
    fn with_human_message(
        self,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<T, WithHumanMessage> {
        self.map_err(|err| WithHumanMessage::new(err, message))
    }

    #[inline]
    fn with_error_code(self, code: i64) -> Result<T, WithErrorCode> {
        self.map_err(|err| WithErrorCode::new(err, code))
    }

    #[inline]
    fn with_http_status(self, status: u16) -> Result<T, WithHttpStatus> {
        self.map_err(|err| WithHttpStatus::new(err, status))
    }

    #[inline]
    fn with_tags(self, tags: impl Into<Tags>) -> Result<T, WithTags> {
        self.map_err(|err| WithTags::new(err, tags))
    }

    #[inline]
    fn named(
        self,
        name: impl Into<Cow<'static, str>>,
        tags: impl Into<Tags>,
    ) -> Result<T, Named> {
        self.map_err(|err| Named::new(err, name, tags))
    }
}
