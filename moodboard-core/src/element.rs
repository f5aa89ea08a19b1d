//! Board elements - the images, swatches, text and textures placed on a board.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BoardError, BoardResult};

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id previously produced by [`ElementId`]'s `Display`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidElementId`] if `s` is not a UUID.
    pub fn parse(s: &str) -> BoardResult<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| BoardError::InvalidElementId(format!("{s}: {e}")))
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The payload-free discriminant of [`ElementContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A photograph or illustration.
    Image,
    /// A flat color swatch.
    Color,
    /// A free text block.
    Text,
    /// A font specimen.
    Typography,
    /// A repeating texture tile.
    Texture,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Image => "image",
            Self::Color => "color",
            Self::Text => "text",
            Self::Typography => "typography",
            Self::Texture => "texture",
        };
        f.write_str(name)
    }
}

/// What an element shows.
///
/// Content is stored as given; values such as colors and CSS lengths are not
/// validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementContent {
    /// An image.
    Image {
        /// Image source URI.
        src: String,
        /// Alternative text.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },

    /// A color swatch.
    Color {
        /// CSS color value, e.g. `#112233`.
        color: String,
    },

    /// A text block.
    Text {
        /// Text content.
        text: String,
        /// Font family name.
        #[serde(rename = "fontFamily")]
        font_family: String,
        /// CSS font size, e.g. `16px`.
        #[serde(rename = "fontSize")]
        font_size: String,
        /// CSS text color.
        color: String,
    },

    /// A typography specimen.
    Typography {
        /// Font family name.
        #[serde(rename = "fontFamily")]
        font_family: String,
    },

    /// A tiled texture.
    Texture {
        /// Texture source URI.
        src: String,
        /// CSS tile size, e.g. `100px`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scale: Option<String>,
    },
}

impl ElementContent {
    /// Alt text used for images that carry none.
    pub const DEFAULT_IMAGE_ALT: &'static str = "Mood board image";

    /// Tile size used for textures that carry none.
    pub const DEFAULT_TEXTURE_SCALE: &'static str = "100px";

    /// Sample line rendered under a typography specimen's family name.
    pub const TYPOGRAPHY_SAMPLE: &'static str = "The quick brown fox jumps over the lazy dog.";

    /// The kind of this content.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Image { .. } => ElementKind::Image,
            Self::Color { .. } => ElementKind::Color,
            Self::Text { .. } => ElementKind::Text,
            Self::Typography { .. } => ElementKind::Typography,
            Self::Texture { .. } => ElementKind::Texture,
        }
    }

    /// Alt text for an image, falling back to [`Self::DEFAULT_IMAGE_ALT`].
    #[must_use]
    pub fn alt_text(&self) -> Option<&str> {
        match self {
            Self::Image { alt, .. } => Some(alt.as_deref().unwrap_or(Self::DEFAULT_IMAGE_ALT)),
            _ => None,
        }
    }

    /// Tile size for a texture, falling back to [`Self::DEFAULT_TEXTURE_SCALE`].
    #[must_use]
    pub fn tile_size(&self) -> Option<&str> {
        match self {
            Self::Texture { scale, .. } => {
                Some(scale.as_deref().unwrap_or(Self::DEFAULT_TEXTURE_SCALE))
            }
            _ => None,
        }
    }

    /// Specimen line shown under a typography sample.
    #[must_use]
    pub const fn sample_text(&self) -> Option<&'static str> {
        match self {
            Self::Typography { .. } => Some(Self::TYPOGRAPHY_SAMPLE),
            _ => None,
        }
    }

    /// Convenience constructor for a color swatch.
    #[must_use]
    pub fn color(color: impl Into<String>) -> Self {
        Self::Color {
            color: color.into(),
        }
    }

    /// Convenience constructor for an image without alt text.
    #[must_use]
    pub fn image(src: impl Into<String>) -> Self {
        Self::Image {
            src: src.into(),
            alt: None,
        }
    }
}

/// Position, size and stacking order of an element, in board units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// X position (units from the board's left edge).
    pub x: f32,
    /// Y position (units from the board's top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Stacking order; higher paints on top.
    pub z_index: i32,
}

impl Placement {
    /// Apply any fields present in `overrides`.
    pub fn merge(&mut self, overrides: &PlacementOverrides) {
        if let Some(x) = overrides.x {
            self.x = x;
        }
        if let Some(y) = overrides.y {
            self.y = y;
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(z_index) = overrides.z_index {
            self.z_index = z_index;
        }
    }

    /// Check if a point (in board coordinates) is within this placement.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Optional placement fields supplied by a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementOverrides {
    /// X position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Y position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    /// Height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// Stacking order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl PlacementOverrides {
    /// Overrides that set only the position.
    #[must_use]
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: None,
            height: None,
            z_index: None,
        }
    }

    /// Set the size.
    #[must_use]
    pub const fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the stacking order.
    #[must_use]
    pub const fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.z_index.is_none()
    }
}

/// Partial update merged into an element by `update_element`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementUpdate {
    /// Replacement content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ElementContent>,
    /// Placement fields to overwrite.
    #[serde(default, skip_serializing_if = "PlacementOverrides::is_empty")]
    pub placement: PlacementOverrides,
    /// New lock state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
}

impl ElementUpdate {
    /// An update that only changes the lock state.
    #[must_use]
    pub fn locked(locked: bool) -> Self {
        Self {
            locked: Some(locked),
            ..Self::default()
        }
    }
}

/// A placed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// What the element shows.
    pub content: ElementContent,
    /// Position, size and stacking order.
    pub placement: Placement,
    /// Locked elements cannot be dragged or resized by pointer gestures.
    pub locked: bool,
}

impl Element {
    /// Create a new unlocked element.
    #[must_use]
    pub fn new(content: ElementContent, placement: Placement) -> Self {
        Self {
            id: ElementId::new(),
            content,
            placement,
            locked: false,
        }
    }

    /// The element's kind.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.content.kind()
    }

    /// Merge a partial update into this element.
    pub fn apply(&mut self, update: &ElementUpdate) {
        if let Some(content) = &update.content {
            self.content = content.clone();
        }
        self.placement.merge(&update.placement);
        if let Some(locked) = update.locked {
            self.locked = locked;
        }
    }
}
