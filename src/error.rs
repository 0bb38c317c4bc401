//! Error types for compilation and rendering.
//!
//! Compilation fails fast with a single [`FormatError`] carrying a closed
//! error code and the byte offset where the problem was detected. Rendering
//! never fails on its own account; a [`RenderError`] only ever wraps a sink
//! I/O failure, since user callbacks (lazy values, the unresolved handler,
//! adapters) are expected to panic rather than return an error.

use std::fmt;

use thiserror::Error;

/// The closed set of compile-time error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// `{{=...=}}` tag is missing its closing `=}}` (or custom-delimited equivalent).
    SetDelim,
    /// `{{=...=}}` tag body did not contain exactly two delimiter tokens.
    BadDelim,
    /// A tag's closing delimiter was never found before end of input.
    Delim,
    /// A section's closing tag name did not match its opener, or a section
    /// was never closed.
    Section,
    /// A tag required a non-empty key and none was given.
    BadKey,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::SetDelim => "set_delim",
            ErrorCode::BadDelim => "baddelim",
            ErrorCode::Delim => "delim",
            ErrorCode::Section => "section",
            ErrorCode::BadKey => "badkey",
        };
        f.write_str(s)
    }
}

/// A compile-time parse failure.
///
/// `position` is a byte offset from the start of the source passed to
/// [`crate::compile`].
#[derive(Debug, Clone, Error)]
#[error("{code} error at byte {position}: {message}")]
pub struct FormatError {
    pub code: ErrorCode,
    pub position: usize,
    pub message: String,
}

impl FormatError {
    pub(crate) fn new(code: ErrorCode, position: usize, message: impl Into<String>) -> Self {
        FormatError { code, position, message: message.into() }
    }
}

/// A render-time failure.
///
/// The renderer does not catch errors raised by user-supplied callables; this
/// type exists only to bridge sink I/O failures back to the caller.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("sink write failed: {0}")]
    Sink(#[from] std::io::Error),
}
