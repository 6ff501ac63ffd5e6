//! Retrieval of annotations from a chain.
//!
//! Two precedence rules apply, and they are intentionally opposite:
//!
//! - Singular values (human message, error code, HTTP status): the outermost
//!   link wins. The walk stops at the first non-zero value.
//! - Merged tags ([`tag_map`]): every tagged link is visited and inner links
//!   overwrite outer ones on key collision. [`tags`] keeps every entry.
//!
//! Every extractor accepts an absent chain and returns the zero value (`""`,
//! `0`, empty collection) for it and for chains without the capability.

use crate::capability::{as_error_code, as_http_status, as_human_message, as_tagged};
use crate::chain::{AsChain, walk};
use crate::tags::{TagMap, TagValue};

/// The outermost human message in the chain, or `""`.
pub fn human_message<'a>(chain: impl AsChain<'a>) -> &'a str {
    let mut message = "";
    walk(chain, |node| {
        if let Some(m) = as_human_message(node) {
            message = m.human_message();
        }
        !message.is_empty()
    });
    message
}

/// The outermost error code in the chain, or `0`.
///
/// ```rust
/// use annotated_errors::{error_code, with_error_code};
/// use std::io;
///
/// let inner = with_error_code(Some(io::Error::other("x")), 1);
/// let outer = with_error_code(inner, 2);
/// assert_eq!(error_code(outer.as_ref()), 2);
/// ```
pub fn error_code<'a>(chain: impl AsChain<'a>) -> i64 {
    let mut code = 0;
    walk(chain, |node| {
        if let Some(c) = as_error_code(node) {
            code = c.error_code();
        }
        code != 0
    });
    code
}

/// The outermost HTTP status in the chain, or `0`.
pub fn http_status<'a>(chain: impl AsChain<'a>) -> u16 {
    let mut status = 0;
    walk(chain, |node| {
        if let Some(s) = as_http_status(node) {
            status = s.http_status();
        }
        status != 0
    });
    status
}

/// Every tag entry in the chain, outermost link first.
pub fn tags<'a>(chain: impl AsChain<'a>) -> Vec<&'a TagValue> {
    let mut all = Vec::new();
    walk(chain, |node| {
        if let Some(tagged) = as_tagged(node) {
            all.extend(tagged.tags());
        }
        false
    });
    all
}

/// Every tag in the chain merged into one map, inner links winning on key
/// collision. Odd-length tag lists are padded with
/// [`UNBALANCED_TAG`](crate::UNBALANCED_TAG).
///
/// ```rust
/// use annotated_errors::{tag_map, tags, with_tags};
/// use std::io;
///
/// let inner = with_tags(Some(io::Error::other("x")), ["k", "inner"]);
/// let outer = with_tags(inner, ["k", "outer"]);
/// assert_eq!(tag_map(outer.as_ref()).get("k").and_then(|v| v.as_str()), Some("inner"));
/// ```
pub fn tag_map<'a>(chain: impl AsChain<'a>) -> TagMap<'a> {
    let mut map = TagMap::new();
    walk(chain, |node| {
        if let Some(tagged) = as_tagged(node) {
            map.merge(tagged.tags());
        }
        false
    });
    map
}
