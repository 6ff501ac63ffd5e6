//! Capability contracts a chain link may expose.
//!
//! Each capability is one narrow, single-method trait. A link either has it
//! or it does not; extractors ask every link through the probe functions
//! below, which inspect a `&dyn Error` with `downcast_ref` against the
//! wrapper types implementing the capability.
//!
//! The traits are sealed: only this crate's wrappers carry capabilities, so
//! the set of types a probe has to try is closed. Errors from other crates
//! take part by being wrapped: any `Error` can be the inner link of a
//! wrapper, and a chain may mix wrappers with foreign links in any order.
//! Read a capability through the extractors ([`error_code`](crate::error_code)
//! and friends) or call the trait method on a wrapper directly.

use crate::named::Named;
use crate::tags::TagValue;
use crate::wrappers::{WithErrorCode, WithHttpStatus, WithHumanMessage, WithTags};
use std::error::Error;

mod sealed {
    pub trait Sealed {}

    impl Sealed for crate::wrappers::WithHumanMessage {}
    impl Sealed for crate::wrappers::WithErrorCode {}
    impl Sealed for crate::wrappers::WithHttpStatus {}
    impl Sealed for crate::wrappers::WithTags {}
    impl Sealed for crate::named::Named {}
}

/// A description of the failure that is safe to show end users.
pub trait HumanMessage: sealed::Sealed {
    /// The message text. Empty means none.
    fn human_message(&self) -> &str;
}

/// A numeric code clients can match on to identify the failure class.
///
/// Sealed: codes are attached with [`WithErrorCode`], not by implementing
/// the trait on another error.
///
/// ```compile_fail
/// use annotated_errors::ErrorCode;
///
/// struct Coded;
///
/// impl ErrorCode for Coded {
///     fn error_code(&self) -> i64 {
///         42
///     }
/// }
/// ```
pub trait ErrorCode: sealed::Sealed {
    /// The code. Zero means none.
    fn error_code(&self) -> i64;
}

/// A transport status to answer the client with.
pub trait HttpStatus: sealed::Sealed {
    /// The status. Zero means none.
    fn http_status(&self) -> u16;
}

/// Alternating key/value pairs attached for diagnostics.
pub trait Tagged: sealed::Sealed {
    /// Keys and values, alternating.
    fn tags(&self) -> &[TagValue];
}

pub(crate) fn as_human_message<'a>(
    node: &'a (dyn Error + 'static),
) -> Option<&'a dyn HumanMessage> {
    node.downcast_ref::<WithHumanMessage>()
        .map(|w| w as &dyn HumanMessage)
}

pub(crate) fn as_error_code<'a>(node: &'a (dyn Error + 'static)) -> Option<&'a dyn ErrorCode> {
    node.downcast_ref::<WithErrorCode>().map(|w| w as &dyn ErrorCode)
}

pub(crate) fn as_http_status<'a>(node: &'a (dyn Error + 'static)) -> Option<&'a dyn HttpStatus> {
    node.downcast_ref::<WithHttpStatus>()
        .map(|w| w as &dyn HttpStatus)
}

pub(crate) fn as_tagged<'a>(node: &'a (dyn Error + 'static)) -> Option<&'a dyn Tagged> {
    if let Some(w) = node.downcast_ref::<WithTags>() {
        return Some(w as &dyn Tagged);
    }
    node.downcast_ref::<Named>().map(|n| n as &dyn Tagged)
}
