//! Text shaping engine.
//!
//! Turns a sequence of Unicode code points into a positioned run of glyphs
//! by interpreting a font's `GSUB`/`GPOS`/`GDEF` tables against a caller
//! supplied [`Pattern`]. [`shape`] is the entry point; the rest of this
//! module is the machinery it drives:
//!
//! - [`Album`] holds the per-glyph working state for one shaping call.
//! - [`Locator`] is the filtered cursor lookups use to walk it.
//! - [`Pattern`] resolves a script/language/feature selection into the
//!   ordered lookup lists the driver applies.
//! - `subst`/`position`/`context` implement the individual `GSUB`/`GPOS`
//!   subtable formats.
//! - `driver` applies a lookup's subtables across a traversal, and a single
//!   lookup at one position for contextual nesting.
//! - `resolve` turns the relative attachment links left by cursive and
//!   mark-to-* positioning into absolute pen positions.

mod album;
mod context;
mod driver;
mod locator;
mod pattern;
mod position;
mod resolve;
mod shaper;
mod subst;

pub use album::{Album, AlbumEntry, GlyphTraits, Vector};
pub use locator::Locator;
pub use pattern::{FeatureUnit, Pattern};
pub use shaper::{is_default_ignorable, shape, TextDirection, TextMode};
