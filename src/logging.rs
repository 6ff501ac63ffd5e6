//! Structured log entry for one annotated chain.
//!
//! [`ErrorReport`] gathers everything a request handler or middleware
//! usually logs about a failure: the short description, the verbose
//! one-line-per-link trace, HTTP status, error code, human message and the
//! full tag list. It borrows from the chain and cannot outlive it.
//!
//! ```rust
//! use annotated_errors::{ErrorReport, tags, with_error_code, with_http_status, with_tags};
//! use std::io;
//!
//! let err = with_http_status(
//!     with_error_code(with_tags(Some(io::Error::other("no rows found")), tags!["user_id", 2]), 1),
//!     404,
//! );
//!
//! let report = ErrorReport::new(err.as_ref()).unwrap();
//! let mut line = String::new();
//! report.write_to(&mut line).unwrap();
//! assert_eq!(
//!     line,
//!     "[404 1] error='http status 404 : error code 1 : no rows found' human_message='' user_id='2'"
//! );
//! ```

use crate::capability::as_tagged;
use crate::chain::{AsChain, walk};
use crate::extract::{error_code, http_status, human_message, tag_map};
use crate::tags::{TagValue, UNBALANCED_TAG};
use smallvec::SmallVec;
use std::error::Error;
use std::fmt::{self, Write as _};

/// Maximum length for any individual field in formatted output.
pub const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated fields.
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Everything worth logging about one chain, borrowed from it.
#[derive(Debug)]
pub struct ErrorReport<'a> {
    error: &'a (dyn Error + 'static),
    human_message: &'a str,
    error_code: i64,
    http_status: u16,
    /// One tag list per tagged link, outermost first.
    tag_lists: SmallVec<[&'a [TagValue]; 4]>,
}

impl<'a> ErrorReport<'a> {
    /// Collect the report, or `None` for an absent chain.
    pub fn new(chain: impl AsChain<'a>) -> Option<Self> {
        let error = chain.as_chain()?;
        Some(Self {
            error,
            human_message: human_message(error),
            error_code: error_code(error),
            http_status: http_status(error),
            tag_lists: tag_lists(error),
        })
    }

    /// Write a single-line record without materializing it first.
    ///
    /// Format: `[{status} {code}] error='{description}'
    /// human_message='{message}' {key}='{value}'...`
    ///
    /// Each field is capped at [`MAX_FIELD_OUTPUT_LEN`] bytes; longer fields
    /// are cut on a character boundary and end in `...[TRUNCATED]`. Tags are
    /// written in chain order and paired within the link that carries them:
    /// an odd trailing key gets the unbalanced-tag placeholder and never
    /// borrows a value from the next link.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{} {}] error='{}' human_message='{}'",
            self.http_status,
            self.error_code,
            bounded_field(self.error)?,
            bounded_field(self.human_message)?
        )?;

        for list in &self.tag_lists {
            for pair in list.chunks(2) {
                let (key, value) = match pair {
                    [key, value] => (key, value),
                    [key] => (key, &UNBALANCED_TAG),
                    _ => continue,
                };
                write!(f, " {}='{}'", bounded_field(key)?, bounded_field(value)?)?;
            }
        }

        Ok(())
    }

    /// The outermost link of the chain.
    #[inline]
    pub fn error(&self) -> &'a (dyn Error + 'static) {
        self.error
    }

    /// Verbose rendering of the chain, one line per link, innermost first.
    #[inline]
    pub fn trace(&self) -> Trace<'a> {
        Trace(self.error)
    }

    /// Outermost non-empty human message.
    #[inline]
    pub const fn human_message(&self) -> &'a str {
        self.human_message
    }

    /// Outermost non-zero error code.
    #[inline]
    pub const fn error_code(&self) -> i64 {
        self.error_code
    }

    /// Outermost non-zero HTTP status.
    #[inline]
    pub const fn http_status(&self) -> u16 {
        self.http_status
    }

    /// Every tag entry, outermost link first.
    pub fn tags(&self) -> impl Iterator<Item = &'a TagValue> + '_ {
        self.tag_lists.iter().flat_map(|&list| list.iter())
    }

    /// The tag list of each tagged link, outermost first.
    #[inline]
    pub fn tag_lists(&self) -> &[&'a [TagValue]] {
        &self.tag_lists
    }

    /// Send the report as one `tracing` error event.
    ///
    /// Fields are attached as-is; truncation is left to the subscriber.
    #[cfg(feature = "tracing")]
    pub fn emit(&self) {
        tracing::error!(
            http_status = self.http_status,
            error_code = self.error_code,
            human_message = self.human_message,
            tags = %tag_map(self.error),
            trace = %self.trace(),
            "{}",
            self.error
        );
    }

    /// Merged tags, inner links winning on key collision.
    #[inline]
    pub fn tag_map(&self) -> crate::tags::TagMap<'a> {
        tag_map(self.error)
    }
}

impl fmt::Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

fn tag_lists<'a>(error: &'a (dyn Error + 'static)) -> SmallVec<[&'a [TagValue]; 4]> {
    let mut lists = SmallVec::new();
    walk(error, |node| {
        if let Some(tagged) = as_tagged(node) {
            lists.push(tagged.tags());
        }
        false
    });
    lists
}

/// Verbose display adapter returned by [`ErrorReport::trace`].
#[derive(Debug, Clone, Copy)]
pub struct Trace<'a>(&'a (dyn Error + 'static));

impl fmt::Display for Trace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.0)
    }
}

/// `fmt::Write` sink that keeps at most `remaining` bytes, cut on a char
/// boundary, and remembers whether anything was dropped.
struct Bounded {
    buf: String,
    remaining: usize,
    truncated: bool,
}

impl fmt::Write for Bounded {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        if s.len() <= self.remaining {
            self.remaining -= s.len();
            self.buf.push_str(s);
            return Ok(());
        }

        let mut idx = self.remaining;
        while idx > 0 && !s.is_char_boundary(idx) {
            idx -= 1;
        }
        self.buf.push_str(&s[..idx]);
        self.remaining = 0;
        self.truncated = true;
        Ok(())
    }
}

/// Render `value` capped at `MAX_FIELD_OUTPUT_LEN` bytes, marking truncation
/// with `TRUNCATION_INDICATOR`. Formatting stops consuming input once the
/// cap is hit, so huge descriptions never materialize in full.
fn bounded_field(value: impl fmt::Display) -> Result<String, fmt::Error> {
    let mut field = Bounded {
        buf: String::new(),
        remaining: MAX_FIELD_OUTPUT_LEN,
        truncated: false,
    };
    write!(field, "{value}")?;

    if field.truncated {
        let mut idx = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());
        while idx > 0 && !field.buf.is_char_boundary(idx) {
            idx -= 1;
        }
        field.buf.truncate(idx);
        field.buf.push_str(TRUNCATION_INDICATOR);
    }

    Ok(field.buf)
}
