//! # Flipbook Engine
//!
//! Layout and structure engine for flipbook documents, layered on the data
//! model in `flipbook-core`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              flipbook-engine                │
//! ├─────────────────────────────────────────────┤
//! │  Layout passes   │  Derived structure       │
//! │  - Collision     │  - Numbering labels      │
//! │  - Gravity       │  - Table of contents     │
//! │  - Placement     │  - Summary pagination    │
//! ├─────────────────────────────────────────────┤
//! │  History ring    │  Editor                  │
//! │  - Snapshots     │  - Commit pipeline       │
//! │  - Undo/redo     │  - Drag sessions         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every committed mutation flows through one pipeline: layout passes
//! adjust geometry, the [`History`] records the snapshot, the structure is
//! re-derived, and the summary page count is reconciled against the derived
//! table of contents.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collision;
pub mod editor;
pub mod error;
pub mod gravity;
pub mod history;
pub mod placement;
pub mod session;
pub mod structure;
pub mod summary;

pub use collision::resolve_collisions;
pub use editor::{Editor, Insertion, PendingInsertion};
pub use error::{EngineError, EngineResult};
pub use gravity::{compact, settle};
pub use history::{History, HISTORY_CAPACITY};
pub use placement::find_position;
pub use session::{DragSession, GestureKind};
pub use structure::{derive_structure, toc_slice, DocumentStructure, TocEntry};
pub use summary::{
    apply_summary_plan, new_summary_page, required_summary_pages, summary_plan, SummaryPlan,
};

/// Engine crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
