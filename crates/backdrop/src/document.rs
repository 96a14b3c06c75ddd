//! The host document model: containers, selectors and decks.
//!
//! A [`Deck`] stands in for a rendered HTML page. It carries the page
//! [`Location`] and the candidate [`Container`]s with their measured size and
//! computed font size. Rendering attaches at most one [`Surface`] to every
//! container matched by the configured [`Selector`].

use std::fmt;

use serde::Deserialize;

use crate::{seed::Location, surface::Surface};

/// Tag assumed for containers that do not name one.
pub const DEFAULT_TAG: &str = "div";

/// A simple element selector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Selector {
    /// `.name`, matches containers carrying the class.
    Class(String),
    /// `#name`, matches the container with this id.
    Id(String),
    /// `name`, matches containers with this tag.
    Tag(String),
    /// `*`, matches every container.
    Any,
}

impl Default for Selector {
    fn default() -> Self {
        Self::Class("slide".to_string())
    }
}

impl Selector {
    /// Parses a selector. An empty string selects everything.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if let Some(class) = text.strip_prefix('.') {
            Self::Class(class.to_string())
        } else if let Some(id) = text.strip_prefix('#') {
            Self::Id(id.to_string())
        } else if text.is_empty() || text == "*" {
            Self::Any
        } else {
            Self::Tag(text.to_ascii_lowercase())
        }
    }

    /// Returns `true` if `container` is selected.
    pub fn matches(&self, container: &Container) -> bool {
        match self {
            Self::Class(class) => container.classes.iter().any(|c| c == class),
            Self::Id(id) => container.id.as_deref() == Some(id.as_str()),
            Self::Tag(tag) => container.tag.eq_ignore_ascii_case(tag),
            Self::Any => true,
        }
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(class) => write!(f, ".{class}"),
            Self::Id(id) => write!(f, "#{id}"),
            Self::Tag(tag) => f.write_str(tag),
            Self::Any => f.write_str("*"),
        }
    }
}

/// An element that can receive a decoration surface.
#[derive(Debug, Clone, Deserialize)]
pub struct Container {
    #[serde(default)]
    id: Option<String>,
    #[serde(default = "default_tag")]
    tag: String,
    #[serde(default)]
    classes: Vec<String>,
    width: f32,
    height: f32,
    /// Computed font size in pixels; `None` when it cannot be read.
    #[serde(default)]
    font_size: Option<f32>,

    #[serde(skip)]
    surface: Option<Surface>,
    #[serde(skip)]
    decorated: bool,
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

impl Container {
    /// Creates an undecorated container of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            id: None,
            tag: default_tag(),
            classes: Vec::new(),
            width,
            height,
            font_size: None,
            surface: None,
            decorated: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn font_size(&self) -> Option<f32> {
        self.font_size
    }

    /// Updates the measured size, as after a resize.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// The surface currently attached, if any.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Whether the container has ever been decorated.
    pub fn is_decorated(&self) -> bool {
        self.decorated
    }

    /// Attaches `surface`, returning the one it replaces.
    pub fn replace_surface(&mut self, surface: Surface) -> Option<Surface> {
        self.decorated = true;
        self.surface.replace(surface)
    }
}

/// A page: its location and its candidate containers in document order.
#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    #[serde(rename = "url", alias = "location")]
    location: Location,
    #[serde(default, rename = "container", alias = "containers")]
    containers: Vec<Container>,
}

impl Deck {
    pub fn new(location: Location, containers: Vec<Container>) -> Self {
        Self {
            location,
            containers,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Navigates to another fragment of the same page.
    pub fn set_hash(&mut self, fragment: &str) {
        self.location = self.location.with_hash(fragment);
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn container(&self, index: usize) -> Option<&Container> {
        self.containers.get(index)
    }

    pub fn container_mut(&mut self, index: usize) -> Option<&mut Container> {
        self.containers.get_mut(index)
    }

    /// Indices of the containers matched by `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<usize> {
        self.containers
            .iter()
            .enumerate()
            .filter(|(_, container)| selector.matches(container))
            .map(|(index, _)| index)
            .collect()
    }

    /// Splits the deck into its location and its containers for rendering.
    pub(crate) fn parts_mut(&mut self) -> (&Location, &mut [Container]) {
        (&self.location, &mut self.containers)
    }
}
