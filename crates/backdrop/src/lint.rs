//! Heading-order lint for HTML decks.
//!
//! Headings must not skip levels on the way down: an `<h1>` may be followed by
//! an `<h2>` but not directly by an `<h3>`. Going back up any number of levels
//! is fine.
//!
//! # Example
//!
//! ```
//! use backdrop::lint::{check_heading_order, extract_headings};
//!
//! let headings = extract_headings("<h1>Deck</h1><h3>Oops</h3>");
//! let issues = check_heading_order(&headings);
//! assert_eq!(
//!     issues[0].to_string(),
//!     r#"Heading level skipped: h1 "Deck" followed by h3 "Oops""#,
//! );
//! ```

use std::{fmt, sync::OnceLock};

use log::{debug, info};
use regex::Regex;

use crate::error::BackdropError;

static OPENING_TAG: OnceLock<Regex> = OnceLock::new();
static ANY_TAG: OnceLock<Regex> = OnceLock::new();

fn opening_tag() -> &'static Regex {
    OPENING_TAG
        .get_or_init(|| Regex::new(r"(?i)<h([1-6])[^>]*>").expect("valid heading pattern"))
}

fn any_tag() -> &'static Regex {
    ANY_TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"))
}

/// A heading found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    level: u8,
    text: String,
}

impl Heading {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    /// Level from 1 to 6.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Text content with tags stripped and common entities decoded.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}: {}", self.level, self.text)
    }
}

/// A heading that descends more than one level below its predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingIssue {
    previous: Heading,
    current: Heading,
}

impl HeadingIssue {
    pub fn previous(&self) -> &Heading {
        &self.previous
    }

    pub fn current(&self) -> &Heading {
        &self.current
    }
}

impl fmt::Display for HeadingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Heading level skipped: h{} \"{}\" followed by h{} \"{}\"",
            self.previous.level, self.previous.text, self.current.level, self.current.text,
        )
    }
}

/// Extracts `<h1>` through `<h6>` headings in document order.
///
/// A heading's content must close with the matching level on the same line;
/// unterminated openings are skipped.
pub fn extract_headings(html: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut start = 0;

    while let Some(open) = opening_tag().captures_at(html, start) {
        let (Some(whole), Some(digit)) = (open.get(0), open.get(1)) else {
            break;
        };
        let level = digit.as_str().parse::<u8>().unwrap_or_default();

        let rest = &html[whole.end()..];
        let line_end = rest
            .find(['\n', '\r', '\u{2028}', '\u{2029}'])
            .unwrap_or(rest.len());
        let line = &rest[..line_end];
        let close = format!("</h{level}>");

        match line.to_ascii_lowercase().find(&close) {
            Some(offset) => {
                headings.push(Heading::new(level, clean_text(&line[..offset])));
                start = whole.end() + offset + close.len();
            }
            None => {
                // Retry from the next character inside the rejected opening tag.
                start = whole.start() + 1;
            }
        }
    }

    headings
}

fn clean_text(inner: &str) -> String {
    any_tag()
        .replace_all(inner, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .trim()
        .to_string()
}

/// Reports every heading that skips a level relative to the previous one.
pub fn check_heading_order(headings: &[Heading]) -> Vec<HeadingIssue> {
    headings
        .windows(2)
        .filter(|pair| pair[1].level.saturating_sub(pair[0].level) > 1)
        .map(|pair| HeadingIssue {
            previous: pair[0].clone(),
            current: pair[1].clone(),
        })
        .collect()
}

/// Extracts the headings of `html` and checks their order.
///
/// # Errors
///
/// Returns [`BackdropError::Lint`] with every issue when a level is skipped.
pub fn lint_html(html: &str) -> Result<Vec<Heading>, BackdropError> {
    let headings = extract_headings(html);
    debug!(headings = headings.len(); "Extracted headings");

    let issues = check_heading_order(&headings);
    if !issues.is_empty() {
        return Err(BackdropError::Lint(issues));
    }

    info!(headings = headings.len(); "Heading order is correct");
    Ok(headings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic() {
        let html = r#"<h1 class="title">Deck</h1>
            <section><h2>Intro <em>now</em></h2></section>
            <H3 id="x">Details</H3>"#;
        let headings = extract_headings(html);
        assert_eq!(
            headings,
            vec![
                Heading::new(1, "Deck"),
                Heading::new(2, "Intro now"),
                Heading::new(3, "Details"),
            ]
        );
    }

    #[test]
    fn test_entities_decoded_in_order() {
        let headings = extract_headings("<h2> a &lt;b&gt; &amp;lt; &quot;c&quot; </h2>");
        assert_eq!(headings[0].text(), r#"a <b> &lt; "c""#);
    }

    #[test]
    fn test_mismatched_and_multiline_headings_skipped() {
        let html = "<h1>Open\nclosed</h1><h2>Ok</h3></h2><h4>Never closed";
        let headings = extract_headings(html);
        assert_eq!(headings, vec![Heading::new(2, "Ok")]);
    }

    #[test]
    fn test_header_tag_is_not_a_heading() {
        let headings = extract_headings("<header><h1>Title</h1></header><hr>");
        assert_eq!(headings, vec![Heading::new(1, "Title")]);
    }

    #[test]
    fn test_check_heading_order() {
        let headings = vec![
            Heading::new(1, "Deck"),
            Heading::new(2, "Part"),
            Heading::new(4, "Deep"),
            Heading::new(2, "Back up"),
            Heading::new(1, "Top"),
            Heading::new(3, "Skip"),
        ];
        let issues = check_heading_order(&headings);
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0].to_string(),
            r#"Heading level skipped: h2 "Part" followed by h4 "Deep""#
        );
        assert_eq!(issues[1].previous().text(), "Top");
        assert_eq!(issues[1].current().level(), 3);
    }

    #[test]
    fn test_lint_html() {
        let headings = lint_html("<h1>A</h1><h2>B</h2><h1>C</h1>").unwrap();
        assert_eq!(headings.len(), 3);

        match lint_html("<h1>A</h1><h4>B</h4><h2>C</h2><h6>D</h6>") {
            Err(BackdropError::Lint(issues)) => assert_eq!(issues.len(), 2),
            other => panic!("expected lint failure, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_and_single() {
        assert!(check_heading_order(&[]).is_empty());
        assert!(check_heading_order(&[Heading::new(3, "Alone")]).is_empty());
    }
}
