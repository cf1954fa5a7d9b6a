//! Support for variable fonts.

pub mod item;

pub use item::{DeltaSetIndexMap, Index, ItemVariationStore, Region};
