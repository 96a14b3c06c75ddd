//! Error types for Backdrop operations.
//!
//! The decoration engine itself never fails: malformed configuration is
//! absorbed by the resolver and unplaceable shapes are omitted. Errors only
//! arise at the edges, when reading manifests, writing surfaces or linting
//! documents.

use std::{io, ops::Range};

use thiserror::Error;

use crate::lint::HeadingIssue;

/// The main error type for Backdrop operations.
///
/// # Diagnostic Variants
///
/// `Parse` keeps the offending source and the byte span of the problem so
/// front ends can point at it. `Lint` carries every heading issue found.
#[derive(Debug, Error)]
pub enum BackdropError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Heading order check failed with {} issue(s)", .0.len())]
    Lint(Vec<HeadingIssue>),
}

impl BackdropError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}
