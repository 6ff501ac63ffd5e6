//! # Annotated Errors
//!
//! Attach structured, queryable metadata to an error as it propagates up a
//! call chain, without committing every layer to one concrete error type.
//!
//! ## Design Philosophy
//!
//! 1. **Annotations are wrappers.** Each wrapper adds exactly one piece of
//!    metadata and owns the error it wraps.
//! 2. **Any error can be annotated.** Wrappers nest around each other or
//!    around any `std::error::Error`, in any order.
//! 3. **Retrieval is generic.** Extractors walk the `source()` chain and ask
//!    each link for a capability, whoever attached it.
//! 4. **Absent is valid.** Wrapping `None` yields `None`, extracting from
//!    `None` yields the zero value. Nothing here panics or fails.
//!
//! ## Precedence
//!
//! - Human message, error code, HTTP status: the **outermost** link wins.
//! - Merged tags ([`tag_map`]): the **innermost** link wins on key
//!   collision. [`tags`] keeps every entry.
//!
//! ## Quick Start
//!
//! ```rust
//! use annotated_errors::{
//!     error_code, http_status, human_message, tag_map, tags, with_error_code,
//!     with_http_status, with_human_message, with_tags,
//! };
//! use std::io;
//!
//! // Data layer
//! let err = with_tags(Some(io::Error::other("no rows found")), tags!["user_id", 2]);
//!
//! // Handler layer
//! let err = with_human_message(
//!     with_http_status(with_error_code(err, 1), 404),
//!     "Sorry, we couldn't find that user",
//! );
//!
//! // Middleware
//! assert_eq!(http_status(err.as_ref()), 404);
//! assert_eq!(error_code(err.as_ref()), 1);
//! assert_eq!(human_message(err.as_ref()), "Sorry, we couldn't find that user");
//! assert_eq!(tag_map(err.as_ref()).to_string(), "{user_id=2}");
//! assert_eq!(
//!     err.map(|e| e.to_string()).as_deref(),
//!     Some("Sorry, we couldn't find that user: http status 404 : error code 1 : no rows found")
//! );
//! ```
//!
//! ## Features
//!
//! - `tracing`: [`ErrorReport::emit`] sends a report as a `tracing` event

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capability;
pub mod chain;
pub mod ext;
pub mod extract;
pub mod logging;
pub mod named;
pub mod tags;
pub mod wrappers;

pub use capability::*;
pub use chain::*;
pub use ext::*;
pub use extract::*;
pub use logging::*;
pub use named::*;
pub use tags::*;
pub use wrappers::*;

/// Type alias for Results carrying an annotated chain.
pub type Result<T> = std::result::Result<T, BoxError>;
