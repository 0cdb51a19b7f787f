//! # Flipbook Core
//!
//! Document model for the flipbook layout engine: absolutely-positioned
//! elements on fixed-size pages, collected into an ordered document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              flipbook-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Geometry        │  Elements                │
//! │  - Rect/overlap  │  - Kinds (closed set)    │
//! │  - Page clamping │  - Opaque content        │
//! │  - Constants     │  - Style bag             │
//! ├─────────────────────────────────────────────┤
//! │  Pages/Document  │  Persistence             │
//! │  - Page roles    │  - Canonical schema      │
//! │  - Ordering      │  - Defensive defaults    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Layout passes, structure derivation and history live in
//! `flipbook-engine`; this crate owns the data they operate on.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod geometry;
pub mod page;
pub mod schema;

pub use config::{EditorConfig, SizeDefault};
pub use document::{Document, MAX_TOC_ITEMS_PER_PAGE};
pub use element::{Element, ElementId, ElementKind, Style};
pub use error::{CoreError, CoreResult};
pub use geometry::{
    Rect, BOTTOM_MARGIN, ELEMENT_GAP, MIN_ELEMENT_SIZE, PAGE_HEIGHT, PAGE_WIDTH, SIDE_MARGIN,
    TOP_MARGIN,
};
pub use page::{Page, PageId, PageKind};
pub use schema::{DocumentFile, ElementRecord, PageRecord};

/// Core crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
