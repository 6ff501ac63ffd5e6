//! Generic traversal of error chains.
//!
//! A chain is the sequence of errors linked by [`Error::source`], outermost
//! first. Nothing in this module knows about messages, codes, statuses or
//! tags: it only walks links and lets a visitor decide when to stop.
//!
//! # Preconditions
//!
//! Chains built from this crate's wrappers own their inner error and cannot
//! form a cycle. A hand-written `source()` can still return a cycle, so every
//! traversal here stops after [`MAX_CHAIN_DEPTH`] links.

use std::error::Error;

/// Owned, thread-safe error used as the inner link of every wrapper.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Maximum number of links any traversal will visit.
pub const MAX_CHAIN_DEPTH: usize = 4096;

/// Anything that can be read as a (possibly absent) error chain.
///
/// Implemented for references to concrete errors, for `dyn Error` references
/// with or without `Send + Sync`, and for `Option` of any of those, where
/// `None` is the absent chain.
///
/// ```rust
/// use annotated_errors::{error_code, with_error_code};
/// use std::io;
///
/// let err = with_error_code(Some(io::Error::other("disk full")), 7);
/// assert_eq!(error_code(err.as_ref()), 7);
///
/// let absent: Option<&io::Error> = None;
/// assert_eq!(error_code(absent), 0);
/// ```
pub trait AsChain<'a> {
    /// Returns the outermost link, or `None` for an absent chain.
    fn as_chain(self) -> Option<&'a (dyn Error + 'static)>;
}

impl<'a, E: Error + 'static> AsChain<'a> for &'a E {
    #[inline]
    fn as_chain(self) -> Option<&'a (dyn Error + 'static)> {
        Some(self)
    }
}

impl<'a> AsChain<'a> for &'a (dyn Error + 'static) {
    #[inline]
    fn as_chain(self) -> Option<&'a (dyn Error + 'static)> {
        Some(self)
    }
}

impl<'a> AsChain<'a> for &'a (dyn Error + Send + Sync + 'static) {
    #[inline]
    fn as_chain(self) -> Option<&'a (dyn Error + 'static)> {
        Some(self)
    }
}

impl<'a, T: AsChain<'a>> AsChain<'a> for Option<T> {
    #[inline]
    fn as_chain(self) -> Option<&'a (dyn Error + 'static)> {
        self.and_then(AsChain::as_chain)
    }
}

/// Walk the chain from the outermost link inward, calling `visitor` on
/// each link until it returns `true`.
///
/// - An absent chain returns `false` without calling `visitor`.
/// - Every link is visited exactly once, including the last one (the link
///   whose `source()` is `None`).
/// - Returns `true` as soon as `visitor` does, `false` once the chain is
///   exhausted.
///
/// ```rust
/// use annotated_errors::{walk, with_http_status};
/// use std::io;
///
/// let err = with_http_status(Some(io::Error::other("boom")), 503);
/// let mut depth = 0;
/// let found = walk(err.as_ref(), |_| {
///     depth += 1;
///     false
/// });
/// assert!(!found);
/// assert_eq!(depth, 2);
/// ```
pub fn walk<'a, F>(chain: impl AsChain<'a>, mut visitor: F) -> bool
where
    F: FnMut(&'a (dyn Error + 'static)) -> bool,
{
    let Some(mut node) = chain.as_chain() else {
        return false;
    };

    for _ in 0..MAX_CHAIN_DEPTH {
        if visitor(node) {
            return true;
        }
        match node.source() {
            Some(next) => node = next,
            None => return false,
        }
    }

    false
}

/// Resolve the root cause: the innermost link, reached by following
/// `source()` until it returns `None`.
///
/// Works on any `source()` chain, independent of [`walk`].
pub fn root_cause<'a>(chain: impl AsChain<'a>) -> Option<&'a (dyn Error + 'static)> {
    let mut node = chain.as_chain()?;
    for _ in 1..MAX_CHAIN_DEPTH {
        match node.source() {
            Some(next) => node = next,
            None => break,
        }
    }
    Some(node)
}
