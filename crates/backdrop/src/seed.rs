//! Seed derivation from page location and container identity.

use std::fmt;

use log::trace;
use serde::Deserialize;

use backdrop_core::hash::fnv1a_32;

/// Fragment used when the location has none.
pub const DEFAULT_FRAGMENT: &str = "#";

/// Selects which identity inputs feed the seed string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SeedMode {
    /// Fragment only.
    Hash,
    /// Pathname followed by the query string.
    Path,
    /// The complete URL.
    Full,
    /// Pathname, query string, then fragment.
    HashPath,
    /// Fragment, container id and pathname joined by `|`.
    #[default]
    HashSlide,
}

impl From<String> for SeedMode {
    /// Unrecognized modes fall back to [`SeedMode::HashSlide`].
    fn from(value: String) -> Self {
        match value.trim() {
            "hash" => Self::Hash,
            "path" => Self::Path,
            "full" => Self::Full,
            "hash+path" => Self::HashPath,
            _ => Self::HashSlide,
        }
    }
}

impl fmt::Display for SeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hash => "hash",
            Self::Path => "path",
            Self::Full => "full",
            Self::HashPath => "hash+path",
            Self::HashSlide => "hash+slide",
        };
        f.write_str(name)
    }
}

/// A page location split into the parts seed derivation reads.
///
/// `search` keeps its leading `?` and `hash` its leading `#`; both are empty
/// when absent, as is a bare `#`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct Location {
    href: String,
    pathname: String,
    search: String,
    hash: String,
}

impl Location {
    /// Splits `href` into pathname, query and fragment.
    ///
    /// Accepts absolute URLs (`https://host/path?q#f`) as well as
    /// host-relative references (`/path?q#f`). An authority without a path
    /// yields the pathname `/`.
    pub fn parse(href: &str) -> Self {
        let href = href.trim();

        let (rest, hash) = match href.split_once('#') {
            Some((rest, fragment)) if !fragment.is_empty() => (rest, format!("#{fragment}")),
            Some((rest, _)) => (rest, String::new()),
            None => (href, String::new()),
        };
        let (rest, search) = match rest.split_once('?') {
            Some((rest, query)) if !query.is_empty() => (rest, format!("?{query}")),
            Some((rest, _)) => (rest, String::new()),
            None => (rest, String::new()),
        };

        let pathname = match rest.split_once("://") {
            Some((_, authority_and_path)) => match authority_and_path.find('/') {
                Some(slash) => authority_and_path[slash..].to_string(),
                None => "/".to_string(),
            },
            None => rest.to_string(),
        };

        Self {
            href: href.to_string(),
            pathname,
            search,
            hash,
        }
    }

    /// Returns this location with its fragment replaced.
    ///
    /// `fragment` may be given with or without the leading `#`.
    pub fn with_hash(&self, fragment: &str) -> Self {
        let base = self.href.split_once('#').map_or(self.href.as_str(), |(b, _)| b);
        let fragment = fragment.trim_start_matches('#');
        if fragment.is_empty() {
            Self::parse(base)
        } else {
            Self::parse(&format!("{base}#{fragment}"))
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns the fragment, possibly empty.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Returns the fragment, or `"#"` when the location has none.
    pub fn hash_or_default(&self) -> &str {
        if self.hash.is_empty() {
            DEFAULT_FRAGMENT
        } else {
            &self.hash
        }
    }
}

impl From<String> for Location {
    fn from(href: String) -> Self {
        Self::parse(&href)
    }
}

/// Builds the seed string for a container.
///
/// `container_id` is the container's identity; `None` contributes an empty
/// string.
pub fn seed_string(mode: SeedMode, location: &Location, container_id: Option<&str>) -> String {
    let hash = location.hash_or_default();
    let pathname = location.pathname();
    let search = location.search();

    match mode {
        SeedMode::Hash => hash.to_string(),
        SeedMode::Path => format!("{pathname}{search}"),
        SeedMode::Full => location.href().to_string(),
        SeedMode::HashPath => format!("{pathname}{search}{hash}"),
        SeedMode::HashSlide => {
            let id = container_id.unwrap_or_default();
            format!("{hash}|{id}|{pathname}")
        }
    }
}

/// A seed string together with its 32-bit hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    text: String,
    value: u32,
}

impl Seed {
    /// Hashes `text` into a seed.
    pub fn new(text: String) -> Self {
        let value = fnv1a_32(&text);
        Self { text, value }
    }

    /// Derives the seed for a container under `mode`.
    pub fn derive(mode: SeedMode, location: &Location, container_id: Option<&str>) -> Self {
        let seed = Self::new(seed_string(mode, location, container_id));
        trace!(mode:% = mode, text = seed.text.as_str(), value = seed.value; "Derived seed");
        seed
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}
