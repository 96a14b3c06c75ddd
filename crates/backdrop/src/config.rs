//! Configuration types for Backdrop decorations.
//!
//! Two shapes of configuration exist:
//!
//! - [`Config`] - The complete, sanitized configuration used by a render pass.
//! - [`PartialConfig`] - A user-supplied override where every field is optional.
//!
//! [`resolve`] merges a [`PartialConfig`] over a [`Config`]. Nested tables
//! (`shapes`, `theme_by_hash`) merge per key; lists and scalars replace the
//! default wholesale. Numeric fields are clamped afterwards, so any override
//! yields a usable configuration.
//!
//! # Example
//!
//! ```
//! # use backdrop::config::{Config, PartialConfig, resolve};
//! let user: PartialConfig = toml::from_str(r#"
//!     density = 1000
//!     layers = 0
//!     [shapes]
//!     lines = false
//! "#).unwrap();
//!
//! let config = resolve(&Config::default(), &user);
//! assert_eq!(config.density(), 400);
//! assert_eq!(config.layers(), 1);
//! assert!(!config.shapes().lines());
//! assert!(config.shapes().circles());
//! ```

use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{
    Deserialize, Deserializer,
    de::{DeserializeOwned, IgnoredAny},
};

use backdrop_core::{
    color::Color,
    placement::CenterRules,
    shape::{ShapeKind, ShapeStyle, ValueRange},
};

use crate::{document::Selector, seed::SeedMode};

/// Upper bound for [`Config::density`].
pub const MAX_DENSITY: u32 = 400;

/// Bounds for [`Config::layers`].
pub const MIN_LAYERS: u32 = 1;
pub const MAX_LAYERS: u32 = 10;

/// Font size assumed when a container's computed font size is unknown.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

const DEFAULT_PALETTE: [&str; 5] = ["#0B3D91", "#00A3A3", "#FFB000", "#E84855", "#5E2BFF"];
const DEFAULT_OPACITY: ValueRange = ValueRange::new(0.08, 0.22);
const DEFAULT_STROKE_WIDTH: ValueRange = ValueRange::new(1.0, 3.0);
const DEFAULT_CENTER_RADIUS: f32 = 0.22;

/// Where the surface is inserted in its container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum InsertPosition {
    /// First child of the container.
    #[default]
    Start,
    /// Last child of the container.
    End,
}

impl InsertPosition {
    /// Returns the insertion keyword used in markup.
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "afterbegin",
            Self::End => "beforeend",
        }
    }
}

impl From<String> for InsertPosition {
    /// Anything other than an explicit end position inserts at the start.
    fn from(value: String) -> Self {
        match value.trim() {
            "beforeend" | "end" => Self::End,
            _ => Self::Start,
        }
    }
}

/// A length that is either absolute or relative to the container font size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "RawLength")]
pub enum Length {
    Px(f32),
    Em(f32),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLength {
    Number(f32),
    Text(String),
}

impl From<RawLength> for Length {
    fn from(raw: RawLength) -> Self {
        match raw {
            RawLength::Number(px) => Self::Px(px),
            RawLength::Text(text) => Self::parse(&text),
        }
    }
}

impl Length {
    /// Parses `"12px"`, `"1.5em"` or a bare number.
    ///
    /// Unparseable input falls back to 16 pixels.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let parsed = if let Some(n) = text.strip_suffix("px") {
            parse_finite(n).map(Self::Px)
        } else if let Some(n) = text.strip_suffix("em") {
            parse_finite(n).map(Self::Em)
        } else {
            parse_finite(text).map(Self::Px)
        };

        parsed.unwrap_or_else(|| {
            warn!(inset = text; "Unparseable length, using default");
            Self::Px(DEFAULT_FONT_SIZE)
        })
    }

    /// Resolves to pixels. `font_size` is the container's computed font size;
    /// `None` or a non-positive value means it could not be read.
    pub fn to_px(self, font_size: Option<f32>) -> f32 {
        let px = match self {
            Self::Px(px) => px,
            Self::Em(em) => {
                let font_size = font_size
                    .filter(|fs| fs.is_finite() && *fs > 0.0)
                    .unwrap_or(DEFAULT_FONT_SIZE);
                em * font_size
            }
        };
        if px.is_finite() { px } else { DEFAULT_FONT_SIZE }
    }
}

fn parse_finite(number: &str) -> Option<f32> {
    number.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

impl Default for Length {
    fn default() -> Self {
        Self::Em(1.0)
    }
}

/// Background fill of a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum Background {
    #[default]
    Transparent,
    Fill(Color),
}

impl Background {
    /// Returns the fill color, or `None` when transparent.
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Transparent => None,
            Self::Fill(color) => Some(color),
        }
    }
}

impl TryFrom<String> for Background {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("transparent") {
            Ok(Self::Transparent)
        } else {
            Color::new(&value).map(Self::Fill)
        }
    }
}

/// Which shape kinds are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeToggles {
    circles: bool,
    triangles: bool,
    lines: bool,
    confetti: bool,
    blobs: bool,
}

impl Default for ShapeToggles {
    fn default() -> Self {
        Self {
            circles: true,
            triangles: true,
            lines: true,
            confetti: true,
            blobs: true,
        }
    }
}

impl ShapeToggles {
    pub fn circles(self) -> bool {
        self.circles
    }

    pub fn triangles(self) -> bool {
        self.triangles
    }

    pub fn lines(self) -> bool {
        self.lines
    }

    pub fn confetti(self) -> bool {
        self.confetti
    }

    pub fn blobs(self) -> bool {
        self.blobs
    }

    /// Returns the enabled kinds in dispatch order.
    pub fn enabled_kinds(self) -> Vec<ShapeKind> {
        ShapeKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                ShapeKind::Circle => self.circles,
                ShapeKind::Triangle => self.triangles,
                ShapeKind::Line => self.lines,
                ShapeKind::Confetti => self.confetti,
                ShapeKind::Blob => self.blobs,
            })
            .collect()
    }

    fn merged(mut self, user: &PartialShapes) -> Self {
        if let Some(v) = user.circles {
            self.circles = v;
        }
        if let Some(v) = user.triangles {
            self.triangles = v;
        }
        if let Some(v) = user.lines {
            self.lines = v;
        }
        if let Some(v) = user.confetti {
            self.confetti = v;
        }
        if let Some(v) = user.blobs {
            self.blobs = v;
        }
        self
    }
}

/// Partial override of [`ShapeToggles`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PartialShapes {
    #[serde(deserialize_with = "lenient")]
    circles: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    triangles: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    lines: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    confetti: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    blobs: Option<bool>,

    #[serde(flatten)]
    unknown: BTreeMap<String, IgnoredAny>,
}

impl PartialShapes {
    fn merged(&self, over: &PartialShapes) -> Self {
        let mut unknown = self.unknown.clone();
        unknown.extend(over.unknown.iter().map(|(k, v)| (k.clone(), *v)));
        Self {
            circles: over.circles.or(self.circles),
            triangles: over.triangles.or(self.triangles),
            lines: over.lines.or(self.lines),
            confetti: over.confetti.or(self.confetti),
            blobs: over.blobs.or(self.blobs),
            unknown,
        }
    }
}

/// Deserializes an optional field, turning a malformed value into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = toml::Value::deserialize(deserializer)?;
    match value.try_into::<T>() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            warn!(err:err; "Ignoring invalid configuration value");
            Ok(None)
        }
    }
}

/// A user-supplied configuration override.
///
/// Every field is optional. Keys that do not belong to the schema are kept
/// aside so they can be reported; they never influence rendering. A value of
/// the wrong shape is dropped with a warning and the default stays. Both
/// `snake_case` keys and the `camelCase` spellings of the browser settings
/// object are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    #[serde(alias = "targetSelector", deserialize_with = "lenient")]
    target_selector: Option<Selector>,
    #[serde(deserialize_with = "lenient")]
    position: Option<InsertPosition>,
    #[serde(alias = "seedMode", deserialize_with = "lenient")]
    seed_mode: Option<SeedMode>,
    #[serde(deserialize_with = "lenient")]
    inset: Option<Length>,
    #[serde(deserialize_with = "lenient")]
    density: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    layers: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    colors: Option<Vec<Color>>,
    #[serde(deserialize_with = "lenient")]
    background: Option<Background>,
    #[serde(alias = "opacityRange", deserialize_with = "lenient")]
    opacity_range: Option<ValueRange>,
    #[serde(alias = "strokeWidthRange", deserialize_with = "lenient")]
    stroke_width_range: Option<ValueRange>,
    #[serde(deserialize_with = "lenient")]
    shapes: Option<PartialShapes>,
    #[serde(alias = "avoidCenter", deserialize_with = "lenient")]
    avoid_center: Option<bool>,
    #[serde(alias = "centerAvoidRadius", deserialize_with = "lenient")]
    center_avoid_radius: Option<f32>,
    #[serde(alias = "zIndex", deserialize_with = "lenient")]
    z_index: Option<i32>,
    #[serde(alias = "themeByHash", deserialize_with = "lenient")]
    theme_by_hash: Option<IndexMap<String, PartialConfig>>,

    #[serde(flatten)]
    unknown: BTreeMap<String, IgnoredAny>,
}

impl PartialConfig {
    /// Creates an empty override.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target selector.
    pub fn with_target_selector(mut self, selector: Selector) -> Self {
        self.target_selector = Some(selector);
        self
    }

    /// Sets the seed mode.
    pub fn with_seed_mode(mut self, mode: SeedMode) -> Self {
        self.seed_mode = Some(mode);
        self
    }

    /// Sets the insertion position.
    pub fn with_position(mut self, position: InsertPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the inset.
    pub fn with_inset(mut self, inset: Length) -> Self {
        self.inset = Some(inset);
        self
    }

    /// Sets the raw (unclamped) density.
    pub fn with_density(mut self, density: i64) -> Self {
        self.density = Some(density);
        self
    }

    /// Sets the raw (unclamped) layer count.
    pub fn with_layers(mut self, layers: i64) -> Self {
        self.layers = Some(layers);
        self
    }

    /// Replaces the palette.
    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Sets the background.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    /// Sets the opacity range.
    pub fn with_opacity_range(mut self, range: ValueRange) -> Self {
        self.opacity_range = Some(range);
        self
    }

    /// Sets the stroke width range.
    pub fn with_stroke_width_range(mut self, range: ValueRange) -> Self {
        self.stroke_width_range = Some(range);
        self
    }

    /// Enables or disables center avoidance.
    pub fn with_avoid_center(mut self, avoid: bool) -> Self {
        self.avoid_center = Some(avoid);
        self
    }

    /// Sets the center avoidance radius fraction.
    pub fn with_center_avoid_radius(mut self, radius: f32) -> Self {
        self.center_avoid_radius = Some(radius);
        self
    }

    /// Sets the z-order of the surface.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Adds a theme applied when the location fragment equals `hash`.
    pub fn with_theme(mut self, hash: impl Into<String>, theme: PartialConfig) -> Self {
        self.theme_by_hash
            .get_or_insert_with(IndexMap::new)
            .insert(hash.into(), theme);
        self
    }

    /// Returns the themes registered by this override, keyed by fragment.
    pub fn themes(&self) -> Option<&IndexMap<String, PartialConfig>> {
        self.theme_by_hash.as_ref()
    }

    /// Returns the names of keys that are not part of the schema, including
    /// those nested in `shapes` (reported as `shapes.<key>`).
    pub fn unknown_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.unknown.keys().cloned().collect();
        if let Some(shapes) = &self.shapes {
            keys.extend(shapes.unknown.keys().map(|key| format!("shapes.{key}")));
        }
        keys
    }

    /// Merges `over` on top of `self`, producing a new override.
    ///
    /// Fields set in `over` win; nested tables merge per key.
    pub fn merged(&self, over: &PartialConfig) -> PartialConfig {
        let shapes = match (&self.shapes, &over.shapes) {
            (Some(base), Some(over)) => Some(base.merged(over)),
            (base, over) => over.clone().or_else(|| base.clone()),
        };
        let theme_by_hash = match (&self.theme_by_hash, &over.theme_by_hash) {
            (Some(base), Some(over)) => Some(merge_themes(base, over)),
            (base, over) => over.clone().or_else(|| base.clone()),
        };
        let mut unknown = self.unknown.clone();
        unknown.extend(over.unknown.iter().map(|(k, v)| (k.clone(), *v)));

        PartialConfig {
            target_selector: over
                .target_selector
                .clone()
                .or_else(|| self.target_selector.clone()),
            position: over.position.or(self.position),
            seed_mode: over.seed_mode.or(self.seed_mode),
            inset: over.inset.or(self.inset),
            density: over.density.or(self.density),
            layers: over.layers.or(self.layers),
            colors: over.colors.clone().or_else(|| self.colors.clone()),
            background: over.background.or(self.background),
            opacity_range: over.opacity_range.or(self.opacity_range),
            stroke_width_range: over.stroke_width_range.or(self.stroke_width_range),
            shapes,
            avoid_center: over.avoid_center.or(self.avoid_center),
            center_avoid_radius: over.center_avoid_radius.or(self.center_avoid_radius),
            z_index: over.z_index.or(self.z_index),
            theme_by_hash,
            unknown,
        }
    }
}

fn merge_themes(
    base: &IndexMap<String, PartialConfig>,
    over: &IndexMap<String, PartialConfig>,
) -> IndexMap<String, PartialConfig> {
    let mut merged = base.clone();
    for (hash, theme) in over {
        let entry = match merged.get(hash) {
            Some(existing) => existing.merged(theme),
            None => theme.clone(),
        };
        merged.insert(hash.clone(), entry);
    }
    merged
}

/// The effective configuration of a render pass.
///
/// Always sanitized: every range is ordered and clamped, the palette is
/// non-empty, and density/layers are within their bounds.
#[derive(Debug, Clone)]
pub struct Config {
    target_selector: Selector,
    position: InsertPosition,
    seed_mode: SeedMode,
    inset: Length,
    density: u32,
    layers: u32,
    colors: Vec<Color>,
    background: Background,
    opacity_range: ValueRange,
    stroke_width_range: ValueRange,
    shapes: ShapeToggles,
    avoid_center: bool,
    center_avoid_radius: f32,
    z_index: i32,
    theme_by_hash: IndexMap<String, PartialConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_selector: Selector::default(),
            position: InsertPosition::default(),
            seed_mode: SeedMode::default(),
            inset: Length::default(),
            density: 24,
            layers: 3,
            colors: default_palette(),
            background: Background::default(),
            opacity_range: DEFAULT_OPACITY,
            stroke_width_range: DEFAULT_STROKE_WIDTH,
            shapes: ShapeToggles::default(),
            avoid_center: true,
            center_avoid_radius: DEFAULT_CENTER_RADIUS,
            z_index: 0,
            theme_by_hash: IndexMap::new(),
        }
    }
}

fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE
        .iter()
        .filter_map(|hex| Color::new(hex).ok())
        .collect()
}

impl Config {
    pub fn target_selector(&self) -> &Selector {
        &self.target_selector
    }

    pub fn position(&self) -> InsertPosition {
        self.position
    }

    pub fn seed_mode(&self) -> SeedMode {
        self.seed_mode
    }

    pub fn inset(&self) -> Length {
        self.inset
    }

    /// Total number of generator calls, in `[0, 400]`.
    pub fn density(&self) -> u32 {
        self.density
    }

    /// Number of layers, in `[1, 10]`.
    pub fn layers(&self) -> u32 {
        self.layers
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn opacity_range(&self) -> ValueRange {
        self.opacity_range
    }

    pub fn stroke_width_range(&self) -> ValueRange {
        self.stroke_width_range
    }

    pub fn shapes(&self) -> ShapeToggles {
        self.shapes
    }

    pub fn avoid_center(&self) -> bool {
        self.avoid_center
    }

    pub fn center_avoid_radius(&self) -> f32 {
        self.center_avoid_radius
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn theme_by_hash(&self) -> &IndexMap<String, PartialConfig> {
        &self.theme_by_hash
    }

    /// Returns the style handed to the shape generators.
    pub fn shape_style(&self) -> ShapeStyle {
        ShapeStyle::new(
            self.colors.clone(),
            self.opacity_range,
            self.stroke_width_range,
        )
    }

    /// Returns the center-avoidance rules handed to the placement arena.
    pub fn center_rules(&self) -> CenterRules {
        CenterRules::new(self.avoid_center, self.center_avoid_radius)
    }

    /// Returns this configuration with the theme registered for `hash`
    /// applied, or a plain copy when no theme matches.
    pub fn themed(&self, hash: &str) -> Config {
        match self.theme_by_hash.get(hash) {
            Some(theme) => {
                debug!(hash; "Applying theme");
                resolve(self, theme)
            }
            None => self.clone(),
        }
    }

    fn sanitized(mut self) -> Self {
        self.opacity_range = self
            .opacity_range
            .sanitized(0.0, 1.0, DEFAULT_OPACITY);
        self.stroke_width_range = self
            .stroke_width_range
            .sanitized(0.0, f32::MAX, DEFAULT_STROKE_WIDTH);
        self.center_avoid_radius = if self.center_avoid_radius.is_finite() {
            self.center_avoid_radius.clamp(0.0, 1.0)
        } else {
            DEFAULT_CENTER_RADIUS
        };
        if self.colors.is_empty() {
            warn!("Empty color palette, using default palette");
            self.colors = default_palette();
        }
        self
    }
}

/// Merges `user` over `defaults` and sanitizes the result.
///
/// Never fails: nested tables merge per key, everything else replaces the
/// default, and out-of-range values are clamped. Unknown keys are logged and
/// otherwise ignored.
pub fn resolve(defaults: &Config, user: &PartialConfig) -> Config {
    let unknown = user.unknown_keys();
    if !unknown.is_empty() {
        warn!(keys:? = unknown; "Ignoring unknown configuration keys");
    }

    let mut config = defaults.clone();

    if let Some(selector) = &user.target_selector {
        config.target_selector = selector.clone();
    }
    if let Some(position) = user.position {
        config.position = position;
    }
    if let Some(mode) = user.seed_mode {
        config.seed_mode = mode;
    }
    if let Some(inset) = user.inset {
        config.inset = inset;
    }
    if let Some(density) = user.density {
        config.density = clamp_count(density, 0, MAX_DENSITY);
    }
    if let Some(layers) = user.layers {
        config.layers = clamp_count(layers, MIN_LAYERS, MAX_LAYERS);
    }
    if let Some(colors) = &user.colors {
        config.colors = colors.clone();
    }
    if let Some(background) = user.background {
        config.background = background;
    }
    if let Some(range) = user.opacity_range {
        config.opacity_range = range;
    }
    if let Some(range) = user.stroke_width_range {
        config.stroke_width_range = range;
    }
    if let Some(shapes) = &user.shapes {
        config.shapes = config.shapes.merged(shapes);
    }
    if let Some(avoid) = user.avoid_center {
        config.avoid_center = avoid;
    }
    if let Some(radius) = user.center_avoid_radius {
        config.center_avoid_radius = radius;
    }
    if let Some(z_index) = user.z_index {
        config.z_index = z_index;
    }
    if let Some(themes) = &user.theme_by_hash {
        config.theme_by_hash = merge_themes(&config.theme_by_hash, themes);
    }

    config.sanitized()
}

fn clamp_count(value: i64, min: u32, max: u32) -> u32 {
    // Clamped into u32 range, so the cast is lossless.
    value.clamp(i64::from(min), i64::from(max)) as u32
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn parse(source: &str) -> PartialConfig {
        toml::from_str(source).expect("valid TOML override")
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.density(), 24);
        assert_eq!(config.layers(), 3);
        assert_eq!(config.colors().len(), 5);
        assert_eq!(config.position(), InsertPosition::Start);
        assert_eq!(config.seed_mode(), SeedMode::HashSlide);
        assert_eq!(config.inset(), Length::Em(1.0));
        assert_eq!(config.background(), Background::Transparent);
        assert!(config.avoid_center());
        assert_approx_eq!(f32, config.center_avoid_radius(), 0.22);
        assert_eq!(config.shapes().enabled_kinds(), ShapeKind::ALL.to_vec());
    }

    #[test]
    fn test_empty_override_is_identity() {
        let config = resolve(&Config::default(), &PartialConfig::default());
        assert_eq!(config.density(), 24);
        assert_eq!(config.layers(), 3);
        assert_eq!(config.opacity_range(), ValueRange::new(0.08, 0.22));
    }

    #[test]
    fn test_density_and_layers_clamped() {
        let user = PartialConfig::new().with_density(1000).with_layers(0);
        let config = resolve(&Config::default(), &user);
        assert_eq!(config.density(), 400);
        assert_eq!(config.layers(), 1);

        let config = resolve(&Config::default(), &PartialConfig::new().with_layers(20));
        assert_eq!(config.layers(), 10);

        let config = resolve(&Config::default(), &PartialConfig::new().with_density(-5));
        assert_eq!(config.density(), 0);
    }

    #[test]
    fn test_shapes_merge_per_key() {
        let config = resolve(&Config::default(), &parse("[shapes]\nconfetti = false\n"));
        let shapes = config.shapes();
        assert!(!shapes.confetti());
        assert!(shapes.circles() && shapes.triangles() && shapes.lines() && shapes.blobs());
        assert_eq!(
            shapes.enabled_kinds(),
            vec![
                ShapeKind::Circle,
                ShapeKind::Triangle,
                ShapeKind::Line,
                ShapeKind::Blob
            ]
        );
    }

    #[test]
    fn test_colors_replace_wholesale() {
        let config = resolve(&Config::default(), &parse(r##"colors = ["#111111"]"##));
        assert_eq!(config.colors(), &[Color::new("#111111").unwrap()]);
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let config = resolve(&Config::default(), &PartialConfig::new().with_colors(Vec::new()));
        assert_eq!(config.colors().len(), 5);
    }

    #[test]
    fn test_ranges_sanitized() {
        let user = PartialConfig::new()
            .with_opacity_range(ValueRange::new(0.9, -0.5))
            .with_stroke_width_range(ValueRange::new(4.0, -1.0))
            .with_center_avoid_radius(3.0);
        let config = resolve(&Config::default(), &user);
        assert_eq!(config.opacity_range(), ValueRange::new(0.0, 0.9));
        assert_eq!(config.stroke_width_range(), ValueRange::new(0.0, 4.0));
        assert_approx_eq!(f32, config.center_avoid_radius(), 1.0);
    }

    #[test]
    fn test_unknown_keys_are_collected() {
        let user = parse("sparkle = true\ndensity = 3\n[shapes]\nhexagons = true\n");
        let mut keys = user.unknown_keys();
        keys.sort();
        assert_eq!(keys, vec!["shapes.hexagons".to_string(), "sparkle".to_string()]);

        let config = resolve(&Config::default(), &user);
        assert_eq!(config.density(), 3);
    }

    #[test]
    fn test_camel_case_aliases() {
        let user = parse(
            r##"
            seedMode = "hash"
            targetSelector = "#deck"
            opacityRange = [0.1, 0.2]
            zIndex = -1
            "##,
        );
        let config = resolve(&Config::default(), &user);
        assert_eq!(config.seed_mode(), SeedMode::Hash);
        assert_eq!(config.target_selector(), &Selector::Id("deck".to_string()));
        assert_eq!(config.z_index(), -1);
    }

    #[test]
    fn test_inset_forms() {
        assert_eq!(parse("inset = 12").inset, Some(Length::Px(12.0)));
        assert_eq!(parse(r#"inset = "8px""#).inset, Some(Length::Px(8.0)));
        assert_eq!(parse(r#"inset = "1.5em""#).inset, Some(Length::Em(1.5)));
        assert_eq!(parse(r#"inset = "bogus""#).inset, Some(Length::Px(16.0)));
    }

    #[test]
    fn test_length_to_px() {
        assert_approx_eq!(f32, Length::Px(10.0).to_px(Some(20.0)), 10.0);
        assert_approx_eq!(f32, Length::Em(1.5).to_px(Some(20.0)), 30.0);
        assert_approx_eq!(f32, Length::Em(1.0).to_px(None), 16.0);
        assert_approx_eq!(f32, Length::Em(2.0).to_px(Some(0.0)), 32.0);
        assert_approx_eq!(f32, Length::Em(1.0).to_px(Some(f32::NAN)), 16.0);
    }

    #[test]
    fn test_background_parsing() {
        let config = resolve(&Config::default(), &parse(r#"background = "transparent""#));
        assert_eq!(config.background().color(), None);

        let config = resolve(&Config::default(), &parse(r##"background = "#fafafa""##));
        assert_eq!(config.background().color(), Color::new("#fafafa").ok());

        assert_eq!(parse(r#"background = "nope""#).background, None);
    }

    #[test]
    fn test_malformed_values_keep_defaults() {
        let cases = [
            r#"density = "many""#,
            "layers = 2.5",
            r#"colors = ["bogus"]"#,
            "opacity_range = [0.1]",
        ];

        for source in cases {
            let user: PartialConfig =
                toml::from_str(source).unwrap_or_else(|err| panic!("{source}: {err}"));
            let config = resolve(&Config::default(), &user);
            assert_eq!(config.density(), 24, "{source}");
            assert_eq!(config.layers(), 3, "{source}");
            assert_eq!(config.colors(), default_palette().as_slice(), "{source}");
            assert_eq!(config.opacity_range(), DEFAULT_OPACITY, "{source}");
        }
    }

    #[test]
    fn test_malformed_value_does_not_discard_siblings() {
        let user = parse(
            r#"
            density = 7
            layers = "deep"
            [shapes]
            lines = "no"
            blobs = false
            "#,
        );
        let config = resolve(&Config::default(), &user);
        assert_eq!(config.density(), 7);
        assert_eq!(config.layers(), 3);
        assert!(config.shapes().lines());
        assert!(!config.shapes().blobs());
    }

    #[test]
    fn test_position_parsing() {
        assert_eq!(parse(r#"position = "beforeend""#).position, Some(InsertPosition::End));
        assert_eq!(parse(r#"position = "end""#).position, Some(InsertPosition::End));
        assert_eq!(parse(r#"position = "sideways""#).position, Some(InsertPosition::Start));
    }

    #[test]
    fn test_theme_by_hash_merges_recursively() {
        let base = resolve(
            &Config::default(),
            &parse(
                r##"
                [theme_by_hash."#intro"]
                density = 5
                [theme_by_hash."#intro".shapes]
                lines = false
                "##,
            ),
        );
        let user = parse(
            r##"
            [theme_by_hash."#intro".shapes]
            blobs = false
            [theme_by_hash."#outro"]
            layers = 2
            "##,
        );
        let config = resolve(&base, &user);
        assert_eq!(config.theme_by_hash().len(), 2);

        let intro = config.themed("#intro");
        assert_eq!(intro.density(), 5);
        assert!(!intro.shapes().lines());
        assert!(!intro.shapes().blobs());
        assert!(intro.shapes().circles());

        let outro = config.themed("#outro");
        assert_eq!(outro.layers(), 2);
        assert_eq!(outro.density(), 24);

        let other = config.themed("#elsewhere");
        assert_eq!(other.density(), 24);
        assert!(other.shapes().lines());
    }

    #[test]
    fn test_partial_merge_prefers_override() {
        let base = PartialConfig::new().with_density(10).with_layers(2);
        let over = PartialConfig::new().with_density(50);
        let merged = base.merged(&over);
        assert_eq!(merged.density, Some(50));
        assert_eq!(merged.layers, Some(2));
    }
}
