//! Render passes over a deck.

use log::{debug, info, trace, warn};

use backdrop_core::{geometry::Size, rng::Mulberry32};

use crate::{
    compose::compose,
    config::{Config, PartialConfig, resolve},
    document::{Container, Deck},
    seed::{Location, Seed},
    surface::Surface,
};

/// Smallest surface or content extent, in pixels.
pub const MIN_EXTENT: f32 = 10.0;

/// An event that requires the decorations to be rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// The document finished loading.
    Ready,
    /// The location fragment changed to the given value.
    FragmentChanged(String),
    /// The container at `index` was resized.
    Resized { index: usize, width: f32, height: f32 },
}

/// Renders the surface for one container.
///
/// The theme registered for the current fragment is applied over `base`
/// first. The surface spans the container's floored size (at least 10 px per
/// side); shapes are laid out in the area left after removing the inset from
/// every side.
pub fn render_surface(base: &Config, location: &Location, container: &Container) -> Surface {
    let config = base.themed(location.hash_or_default());

    let width = floor_extent(container.width());
    let height = floor_extent(container.height());
    let inset = config.inset().to_px(container.font_size());
    let area = Size::new(
        (width - 2.0 * inset).max(MIN_EXTENT),
        (height - 2.0 * inset).max(MIN_EXTENT),
    );

    let seed = Seed::derive(config.seed_mode(), location, container.id());
    let mut rng = Mulberry32::new(seed.value());
    let composition = compose(&config, &mut rng, area);

    debug!(
        id = container.id().unwrap_or_default(),
        seed = seed.value(),
        primitives = composition.len();
        "Rendered surface",
    );

    // Both extents are floored and at least 10, so the casts are exact.
    Surface::new(width as u32, height as u32, inset, seed, composition)
        .with_background(config.background().color())
        .with_z_index(config.z_index())
        .with_position(config.position())
}

fn floor_extent(value: f32) -> f32 {
    value.floor().max(MIN_EXTENT)
}

/// Drives render passes over a [`Deck`].
///
/// The user override is resolved over the defaults at the start of every
/// pass, so each pass observes a complete configuration.
///
/// # Examples
///
/// ```
/// use backdrop::{
///     Renderer, Trigger,
///     config::PartialConfig,
///     document::{Container, Deck},
///     seed::Location,
/// };
///
/// let mut deck = Deck::new(
///     Location::parse("/deck/index.html#intro"),
///     vec![Container::new(800.0, 600.0).with_id("slide-1").with_class("slide")],
/// );
///
/// let renderer = Renderer::new(PartialConfig::default());
/// let rendered = renderer.handle(&mut deck, Trigger::Ready);
/// assert_eq!(rendered, 1);
///
/// let surface = deck.container(0).and_then(|c| c.surface()).unwrap();
/// assert_eq!(surface.seed().text(), "#intro|slide-1|/deck/index.html");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    user: PartialConfig,
}

impl Renderer {
    /// Creates a renderer with the given user override.
    pub fn new(user: PartialConfig) -> Self {
        Self { user }
    }

    pub fn user_config(&self) -> &PartialConfig {
        &self.user
    }

    /// Resolves the effective base configuration.
    pub fn config(&self) -> Config {
        resolve(&Config::default(), &self.user)
    }

    /// Renders every matching container of `deck`, replacing any surface
    /// they already carry. Returns the number of containers rendered.
    pub fn render_all(&self, deck: &mut Deck) -> usize {
        let base = self.config();
        let selected = deck.select(base.target_selector());
        info!(
            selector:% = base.target_selector(),
            containers = selected.len();
            "Rendering deck",
        );

        let (location, containers) = deck.parts_mut();
        for &index in &selected {
            let container = &mut containers[index];
            let surface = render_surface(&base, location, container);
            if container.replace_surface(surface).is_some() {
                trace!(index; "Replaced previous surface");
            }
        }

        selected.len()
    }

    /// Applies `trigger` to `deck` and re-renders every matching container.
    /// Returns the number of containers rendered.
    pub fn handle(&self, deck: &mut Deck, trigger: Trigger) -> usize {
        debug!(trigger:?; "Handling trigger");
        match trigger {
            Trigger::Ready => {}
            Trigger::FragmentChanged(fragment) => deck.set_hash(&fragment),
            Trigger::Resized {
                index,
                width,
                height,
            } => match deck.container_mut(index) {
                Some(container) => container.set_size(width, height),
                None => warn!(index; "Resize for unknown container"),
            },
        }
        self.render_all(deck)
    }
}
