//! Editor configuration - injected defaults for newly created elements.
//!
//! The host application loads this once at session start and persists it on
//! change; the layout passes never read it directly. Per-kind lookups fall
//! back to an empty style bag and a generic size.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::element::{ElementKind, Style};
use crate::geometry::{BOTTOM_MARGIN, PAGE_WIDTH, SIDE_MARGIN, TOP_MARGIN};

/// Default width and height for a kind, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeDefault {
    /// Default width.
    pub width: f32,
    /// Default height.
    pub height: f32,
}

/// Per-kind defaults applied to newly created elements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Per-kind style defaults; missing kinds fall back to an empty bag.
    #[serde(default)]
    style_defaults: HashMap<ElementKind, Style>,
    /// Per-kind size overrides; missing kinds fall back to built-ins.
    #[serde(default)]
    size_defaults: HashMap<ElementKind, SizeDefault>,
}

impl EditorConfig {
    /// Create a configuration with built-in defaults only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Style defaults for a kind, or an empty bag when none are configured.
    #[must_use]
    pub fn style_for(&self, kind: ElementKind) -> Style {
        self.style_defaults.get(&kind).cloned().unwrap_or_default()
    }

    /// Replace the style defaults for a kind.
    pub fn set_style_default(&mut self, kind: ElementKind, style: Style) {
        self.style_defaults.insert(kind, style);
    }

    /// Default size for a kind (configured override or built-in).
    #[must_use]
    pub fn default_size(&self, kind: ElementKind) -> SizeDefault {
        self.size_defaults
            .get(&kind)
            .copied()
            .unwrap_or_else(|| Self::builtin_size(kind))
    }

    /// Override the default size for a kind.
    pub fn set_default_size(&mut self, kind: ElementKind, size: SizeDefault) {
        self.size_defaults.insert(kind, size);
    }

    /// Default left edge for a kind: 0 for full-bleed banners, the side
    /// margin otherwise.
    #[must_use]
    pub fn default_x(kind: ElementKind) -> f32 {
        if kind.is_full_bleed() {
            0.0
        } else {
            SIDE_MARGIN
        }
    }

    fn builtin_size(kind: ElementKind) -> SizeDefault {
        let (width, height) = match kind {
            ElementKind::Text => (PAGE_WIDTH - 2.0 * SIDE_MARGIN, 120.0),
            ElementKind::Shape => (200.0, 200.0),
            ElementKind::Image => (320.0, 240.0),
            ElementKind::Video => (420.0, 260.0),
            ElementKind::Audio => (320.0, 80.0),
            ElementKind::Model3d => (400.0, 300.0),
            ElementKind::Quiz => (500.0, 360.0),
            ElementKind::Flashcards => (500.0, 300.0),
            ElementKind::SequenceTitle => (PAGE_WIDTH, 90.0),
            ElementKind::PartTitle => (400.0, 70.0),
            ElementKind::SubTitle => (360.0, 60.0),
            ElementKind::SubSubTitle => (320.0, 50.0),
            ElementKind::TableOfContents => (
                PAGE_WIDTH - 2.0 * SIDE_MARGIN,
                crate::geometry::PAGE_HEIGHT - TOP_MARGIN - BOTTOM_MARGIN,
            ),
        };
        SizeDefault { width, height }
    }
}
