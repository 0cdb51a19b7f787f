//! Document elements - positioned content units on a page.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Rect;

/// Unique identifier for an element, stable across its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
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

/// The kind of content an element carries.
///
/// This is a closed set. Structural kinds ([`ElementKind::SequenceTitle`],
/// [`ElementKind::PartTitle`], [`ElementKind::SubTitle`],
/// [`ElementKind::SubSubTitle`]) participate in the numbering hierarchy;
/// all other kinds are opaque to the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Free-form rich text.
    Text,
    /// A drawn shape (rectangle, ellipse, line).
    Shape,
    /// A raster or vector image.
    Image,
    /// An embedded video.
    Video,
    /// An embedded audio clip.
    Audio,
    /// An interactive 3D model viewer.
    Model3d,
    /// An interactive quiz block.
    Quiz,
    /// A flashcard deck.
    Flashcards,
    /// Top-level sequence heading (full-bleed banner, one per page).
    SequenceTitle,
    /// Part heading within a sequence.
    PartTitle,
    /// Sub-part heading (third numbering level).
    SubTitle,
    /// Sub-sub-part heading (fourth numbering level).
    SubSubTitle,
    /// Table-of-contents display block hosted on summary pages.
    TableOfContents,
}

impl ElementKind {
    /// True if this kind participates in the numbering hierarchy.
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(
            self,
            Self::SequenceTitle | Self::PartTitle | Self::SubTitle | Self::SubSubTitle
        )
    }

    /// True if at most one element of this kind may exist per page.
    #[must_use]
    pub const fn is_single_instance(self) -> bool {
        matches!(self, Self::SequenceTitle)
    }

    /// True if this kind spans the full page width and defaults to `x = 0`.
    #[must_use]
    pub const fn is_full_bleed(self) -> bool {
        matches!(self, Self::SequenceTitle)
    }

    /// True if this kind produces a table-of-contents entry.
    ///
    /// Sub-headings are numbered but never listed.
    #[must_use]
    pub const fn is_toc_listed(self) -> bool {
        matches!(self, Self::SequenceTitle | Self::PartTitle)
    }
}

/// Presentation attribute bag attached to an element.
///
/// Rendering hints only (color, border, stacking order); layout never
/// orders elements by anything in here, only by geometric `y`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(serde_json::Map<String, serde_json::Value>);

impl Style {
    /// Create an empty style bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no attributes are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up an attribute by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.insert(key.into(), value);
    }

    /// Stacking order hint, defaulting to 0 when unset or non-numeric.
    #[must_use]
    pub fn z_index(&self) -> i64 {
        self.0
            .get("z_index")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or(0)
    }
}

/// A positioned content unit on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Content kind.
    pub kind: ElementKind,
    /// Position and size in page-local pixels.
    pub frame: Rect,
    /// Opaque payload whose interpretation is kind-specific (plain text,
    /// serialized JSON, markup, data URI). Never parsed by the engine.
    pub content: String,
    /// Presentation attributes.
    pub style: Style,
}

impl Element {
    /// Create a new element with a fresh ID and a default frame.
    #[must_use]
    pub fn new(kind: ElementKind, content: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            frame: Rect::default(),
            content: content.into(),
            style: Style::new(),
        }
    }

    /// Set the frame.
    #[must_use]
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    /// Set the style bag.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Check if a point (in page coordinates) is within this element.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.frame.contains_point(x, y)
    }
}
