#![warn(missing_docs)]
//! Editor Core Line Heights - per-line height index for virtualized text views
//!
//! # Overview
//!
//! A text view that only renders visible rows needs to turn line numbers into vertical
//! offsets and back. When every line has the same height that is a multiplication; once
//! decorations (code lens, inline widgets, zones) give some lines a custom height, it needs an
//! index.
//!
//! [`LineHeightIndex`] stores a default line height plus a sparse set of overrides, each keyed
//! by a caller-owned [`OverrideId`], and answers:
//!
//! - the effective height of a line (the largest override on it, or the default), and
//! - the cumulative height of the document through a line.
//!
//! # Lazy commits
//!
//! ```text
//! insert_or_update / remove_override / set_default_height   ← record intent only
//!                         │
//!                         ▼
//!          pending queue + "invalid from" marker
//!                         │  first query
//!                         ▼
//!   commit: merge queue, rebuild dirtied suffix (runs, prefix sums)
//!                         │
//!                         ▼
//!          O(log n) binary-search queries
//! ```
//!
//! Text edits that add or remove lines are forwarded through
//! [`on_lines_inserted`](LineHeightIndex::on_lines_inserted) and
//! [`on_lines_deleted`](LineHeightIndex::on_lines_deleted) so overrides stay attached to
//! their lines.
//!
//! # Quick Start
//!
//! ```rust
//! use editor_core_line_heights::{LineHeightIndex, OverrideId};
//!
//! let mut index = LineHeightIndex::new(20);
//! index.insert_or_update(OverrideId(1), 5, 40);
//!
//! assert_eq!(index.height_for_line(5), 40);
//! assert_eq!(index.cumulative_height_through(4), 80);
//! assert_eq!(index.cumulative_height_through(5), 120);
//!
//! // Two lines deleted above the override.
//! index.on_lines_deleted(3, 4);
//! assert_eq!(index.height_for_line(3), 40);
//! assert_eq!(index.line_at_offset(45), 3);
//! ```
//!
//! # Module Description
//!
//! - [`index`] - the index, mutation entry points, queries and commit
//! - [`line_shift`] - line insertion/deletion shifting
//! - [`viewport`] - offset → line conversion and visible ranges
//! - [`config`] - serde-backed configuration
//!
//! All operations are synchronous and take `&mut self`; queries commit before reading.

pub mod config;
mod error;
pub mod index;
pub mod line_shift;
mod special_line;
pub mod viewport;

pub use config::{DEFAULT_LINE_HEIGHT, LineHeightConfig};
pub use error::LineHeightError;
pub use index::LineHeightIndex;
pub use special_line::{OverrideId, SpecialLine};
