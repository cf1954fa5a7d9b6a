//! Glyph positioning table.

use crate::otl::*;
use crate::parse_prelude::*;

pub const GPOS: Tag = Tag::new(b"GPOS");

#[derive(Copy, Clone)]
pub struct Gpos<'a>(pub Layout<'a>);

impl<'a> Gpos<'a> {
    pub fn new(data: &'a [u8], gdef: Option<Gdef<'a>>) -> Self {
        Self(Layout::new(Stage::PositionAdjustment, data, gdef))
    }

    pub fn gdef(&self) -> Option<&Gdef<'a>> {
        self.0.gdef()
    }

    pub fn num_scripts(&self) -> u16 {
        self.0.num_scripts()
    }

    pub fn script(&'a self, index: u16) -> Option<Script<'a>> {
        self.0.script(index)
    }

    pub fn scripts(&'a self) -> impl Iterator<Item = Script<'a>> + 'a + Clone {
        self.0.scripts()
    }

    pub fn num_features(&self) -> u16 {
        self.0.num_features()
    }

    pub fn feature(&'a self, index: u16) -> Option<Feature<'a>> {
        self.0.feature(index)
    }

    pub fn features(&'a self) -> impl Iterator<Item = Feature<'a>> + 'a + Clone {
        self.0.features()
    }

    pub fn feature_variations(&'a self) -> Option<FeatureVariations<'a>> {
        self.0.feature_variations()
    }

    pub fn num_lookups(&self) -> u16 {
        self.0.num_lookups()
    }

    pub fn lookup(&'a self, index: u16) -> Option<Lookup<'a>> {
        self.0.lookup(index)
    }

    pub fn lookups(&'a self) -> impl Iterator<Item = Lookup<'a>> + 'a + Clone {
        self.0.lookups()
    }
}
