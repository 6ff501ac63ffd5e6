//! Named and tagged links.
//!
//! [`Named`] carries an optional symbolic name together with tags in one
//! link. The name lets callers ask whether a specific failure happened
//! somewhere in a chain ([`is_any_cause_named`]) or was the root cause
//! ([`is_root_cause_named`]) without matching on concrete error types.
//!
//! ```rust
//! use annotated_errors::{is_any_cause_named, is_root_cause_named, new_named, tags, with_human_message};
//! use std::io;
//!
//! let root = io::Error::other("the root cause");
//! let err = with_human_message(new_named(Some(root), "SUPER_BAD", tags![]), "something bad happened");
//!
//! assert!(is_any_cause_named(err.as_ref(), "SUPER_BAD"));
//! assert!(!is_root_cause_named(err.as_ref(), "SUPER_BAD"));
//! assert_eq!(
//!     err.map(|e| e.to_string()).as_deref(),
//!     Some("something bad happened: SUPER_BAD: the root cause")
//! );
//! ```

use crate::capability::Tagged;
use crate::chain::{AsChain, BoxError, root_cause, walk};
use crate::tags::{TagValue, Tags};
use crate::wrappers::render;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use zeroize::Zeroize;

pub use crate::extract::{tag_map as get_tag_map, tags as get_tags};

/// A link carrying an optional name and tags.
///
/// Renders as `{name}: {inner}` when named and exactly as the wrapped error
/// when not. A link built with [`Named::root`] wraps nothing and renders as
/// its name alone.
#[derive(Debug)]
pub struct Named {
    name: Cow<'static, str>,
    tags: Tags,
    source: Option<BoxError>,
}

impl Named {
    /// Named link. An empty `name` leaves it unnamed.
    #[inline]
    pub fn new(
        source: impl Into<BoxError>,
        name: impl Into<Cow<'static, str>>,
        tags: impl Into<Tags>,
    ) -> Self {
        Self {
            name: name.into(),
            tags: tags.into(),
            source: Some(source.into()),
        }
    }

    /// Named failure that is itself the root cause of its chain.
    ///
    /// With an empty `name` the link has nothing to render: it displays as
    /// an empty string and never matches [`is_named`].
    ///
    /// ```rust
    /// use annotated_errors::{is_root_cause_named, with_http_status, Named, tags};
    ///
    /// let err = with_http_status(Some(Named::root("QUOTA_EXCEEDED", tags![])), 429);
    /// assert!(is_root_cause_named(err.as_ref(), "QUOTA_EXCEEDED"));
    /// ```
    #[inline]
    pub fn root(name: impl Into<Cow<'static, str>>, tags: impl Into<Tags>) -> Self {
        Self {
            name: name.into(),
            tags: tags.into(),
            source: None,
        }
    }

    /// Unnamed link carrying only tags.
    #[inline]
    pub fn unnamed(source: impl Into<BoxError>, tags: impl Into<Tags>) -> Self {
        Self::new(source, "", tags)
    }

    /// The tag list this link carries.
    #[inline]
    pub fn entries(&self) -> &Tags {
        &self.tags
    }

    /// The name, if one is set.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        (!self.name.is_empty()).then_some(self.name.as_ref())
    }
}

impl Tagged for Named {
    #[inline]
    fn tags(&self) -> &[TagValue] {
        self.tags.as_slice()
    }
}

impl fmt::Display for Named {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), self.source.as_deref()) {
            (Some(name), Some(inner)) => render(f, Some(format_args!("{name}: ")), inner),
            (None, Some(inner)) => render(f, None, inner),
            (_, None) => f.write_str(&self.name),
        }
    }
}

impl Error for Named {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

impl Drop for Named {
    fn drop(&mut self) {
        if let Cow::Owned(ref mut s) = self.name {
            s.zeroize();
        }
    }
}

/// Wrap `err` in a named link with tags.
pub fn new_named<E>(
    err: Option<E>,
    name: impl Into<Cow<'static, str>>,
    tags: impl Into<Tags>,
) -> Option<Named>
where
    E: Into<BoxError>,
{
    err.map(|err| Named::new(err, name, tags))
}

/// Wrap `err` in an unnamed link with tags.
pub fn new_tags<E>(err: Option<E>, tags: impl Into<Tags>) -> Option<Named>
where
    E: Into<BoxError>,
{
    err.map(|err| Named::unnamed(err, tags))
}

/// True if `node` itself, without walking, is a [`Named`] link whose
/// non-empty name equals `name`.
pub fn is_named<'a>(node: impl AsChain<'a>, name: &str) -> bool {
    node.as_chain()
        .and_then(|e| e.downcast_ref::<Named>())
        .and_then(Named::name)
        .is_some_and(|n| n == name)
}

/// True if any link of the chain is named `name`.
pub fn is_any_cause_named<'a>(chain: impl AsChain<'a>, name: &str) -> bool {
    walk(chain, |node| is_named(node, name))
}

/// True if the root cause, and only the root cause, is named `name`.
pub fn is_root_cause_named<'a>(chain: impl AsChain<'a>, name: &str) -> bool {
    root_cause(chain).is_some_and(|root| is_named(root, name))
}
