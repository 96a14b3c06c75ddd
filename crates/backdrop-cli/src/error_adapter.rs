//! Error adapter for converting BackdropError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! A [`BackdropError::Lint`] failure carries every heading issue found; each
//! issue is rendered independently.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use backdrop::{BackdropError, lint::HeadingIssue};

/// Adapter for a parse error with its source text.
pub struct SourceAdapter<'a> {
    message: &'a str,
    span: Option<&'a Range<usize>>,
    src: &'a str,
}

impl<'a> SourceAdapter<'a> {
    /// Create a new source adapter.
    pub fn new(message: &'a str, span: Option<&'a Range<usize>>, src: &'a str) -> Self {
        Self { message, span, src }
    }
}

impl fmt::Debug for SourceAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceAdapter")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for SourceAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for SourceAdapter<'_> {}

impl MietteDiagnostic for SourceAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("backdrop::parse"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label =
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span_to_miette(span));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for a single heading-order issue.
pub struct IssueAdapter<'a>(pub &'a HeadingIssue);

impl fmt::Debug for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for IssueAdapter<'_> {}

impl MietteDiagnostic for IssueAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("backdrop::lint"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let expected = self.0.previous().level().saturating_add(1);
        Some(Box::new(format!("use an h{expected} here or add the missing level")))
    }
}

/// Adapter for [`BackdropError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a BackdropError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            BackdropError::Io(_) => "backdrop::io",
            BackdropError::Parse { .. } => "backdrop::parse",
            BackdropError::Config(_) => "backdrop::config",
            BackdropError::Export(_) => "backdrop::export",
            BackdropError::Lint(_) => "backdrop::lint",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An error pointing into its source text.
    Source(SourceAdapter<'a>),
    /// One heading-order issue.
    Issue(IssueAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Source(s) => fmt::Display::fmt(s, f),
            Reportable::Issue(i) => fmt::Display::fmt(i, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Source(_) | Reportable::Issue(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Source(s) => s.code(),
            Reportable::Issue(i) => i.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Source(s) => s.help(),
            Reportable::Issue(i) => i.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Source(s) => s.source_code(),
            Reportable::Issue(i) => i.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Source(s) => s.labels(),
            Reportable::Issue(i) => i.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a byte range to a miette [`SourceSpan`].
fn span_to_miette(span: &Range<usize>) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

/// Convert a [`BackdropError`] into a list of reportable errors.
///
/// [`BackdropError::Lint`] yields one [`Reportable`] per issue; every other
/// variant yields a single [`Reportable`].
pub fn to_reportables(err: &BackdropError) -> Vec<Reportable<'_>> {
    match err {
        BackdropError::Parse { message, span, src } => vec![Reportable::Source(
            SourceAdapter::new(message, span.as_ref(), src),
        )],
        BackdropError::Lint(issues) if !issues.is_empty() => issues
            .iter()
            .map(|issue| Reportable::Issue(IssueAdapter(issue)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use backdrop::lint::{check_heading_order, extract_headings};

    use super::*;

    #[test]
    fn test_parse_error_points_at_span() {
        let err = BackdropError::new_parse_error("bad value", Some(10..13), "density = abc");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].to_string(), "bad value");
        assert_eq!(reportables[0].code().unwrap().to_string(), "backdrop::parse");

        let labels: Vec<_> = reportables[0].labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 10);
        assert_eq!(labels[0].len(), 3);
        assert!(labels[0].primary());
    }

    #[test]
    fn test_parse_error_without_span() {
        let err = BackdropError::new_parse_error("bad file", None, "");
        let reportables = to_reportables(&err);
        assert!(reportables[0].labels().is_none());
    }

    #[test]
    fn test_lint_issues_are_separate() {
        let headings = extract_headings("<h1>A</h1><h3>B</h3><h1>C</h1><h4>D</h4>");
        let err = BackdropError::Lint(check_heading_order(&headings));

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(
            reportables[0].to_string(),
            r#"Heading level skipped: h1 "A" followed by h3 "B""#
        );
        assert_eq!(reportables[1].code().unwrap().to_string(), "backdrop::lint");
        assert_eq!(
            reportables[0].help().unwrap().to_string(),
            "use an h2 here or add the missing level"
        );
    }

    #[test]
    fn test_non_source_errors() {
        let cases = [
            (BackdropError::Config("bad".to_string()), "backdrop::config"),
            (BackdropError::Export("full".to_string()), "backdrop::export"),
            (
                BackdropError::Io(std::io::Error::other("gone")),
                "backdrop::io",
            ),
        ];

        for (err, code) in &cases {
            let reportables = to_reportables(err);
            assert_eq!(reportables.len(), 1);
            match &reportables[0] {
                Reportable::Error(e) => assert_eq!(e.code().unwrap().to_string(), *code),
                other => panic!("expected plain error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_config_error_message() {
        let err = BackdropError::Config("bad".to_string());
        let reportables = to_reportables(&err);
        assert_eq!(reportables[0].to_string(), "Configuration error: bad");
    }
}
