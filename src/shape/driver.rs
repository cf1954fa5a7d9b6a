//! Lookup driver (component F): applies a lookup's subtables across a
//! filtered traversal of the album, and the single-shot application a
//! contextual lookup uses to invoke a nested lookup at one position.

use super::album::Album;
use super::context;
use super::locator::Locator;
use super::pattern::FeatureUnit;
use super::{position, subst};
use crate::otl::{Gdef, Layout, Lookup, LookupKind, Stage, SubtableKind};
use core::cell::Cell;

/// Applies the lookups of a single stage (GSUB or GPOS) against an album.
///
/// Holds the per-feature-unit state (the current feature mask and, for
/// Alternate Substitution, the current alternate selector) that the
/// individual subtable handlers need but that does not belong on `Album`
/// itself.
pub struct Driver<'a> {
    layout: &'a Layout<'a>,
    gdef: Option<&'a Gdef<'a>>,
    alternate_index: Cell<u16>,
    feature_mask: Cell<u16>,
}

impl<'a> Driver<'a> {
    /// Creates a driver for one stage of a pattern (GSUB or GPOS).
    pub fn new(layout: &'a Layout<'a>, gdef: Option<&'a Gdef<'a>>) -> Self {
        Self {
            layout,
            gdef,
            alternate_index: Cell::new(0),
            feature_mask: Cell::new(0xFFFF),
        }
    }

    pub(super) fn gdef(&self) -> Option<&'a Gdef<'a>> {
        self.gdef
    }

    /// Runs every lookup named by `units` across the full album, in font
    /// order. The locator is reset to the full album range before each
    /// lookup, since a prior lookup may have grown or shrunk it.
    pub fn apply_feature_range(&self, units: &[FeatureUnit], album: &mut Album) {
        let substitution = self.layout.stage() == Stage::Substitution;
        for unit in units {
            self.feature_mask.set(unit.mask);
            self.alternate_index.set(unit.alternate_index);
            for &lookup_index in &unit.lookup_indices {
                let lookup = match self.layout.lookup(lookup_index) {
                    Some(lookup) => lookup,
                    None => continue,
                };
                let mut locator = Locator::new();
                locator.reset(0, album.glyph_count());
                locator.set_filter(lookup.record.flag, &lookup.record.filter);
                locator.set_feature_mask(unit.mask);
                if substitution && lookup.record.kind == LookupKind::RevChainContext {
                    locator.jump_to(album.glyph_count());
                    while locator.move_previous(album, self.gdef) {
                        self.apply_subtables(&lookup, album, &mut locator);
                    }
                } else {
                    while locator.move_next(album, self.gdef) {
                        self.apply_subtables(&lookup, album, &mut locator);
                    }
                }
            }
        }
    }

    /// Applies a single lookup at one position, without traversal. Used by
    /// contextual and chained contextual lookups to invoke a nested lookup
    /// at a rule-specified sequence position, isolated from the outer
    /// traversal's own locator state.
    pub(super) fn apply_lookup(&self, lookup_index: u16, album: &mut Album, at: usize) -> bool {
        let lookup = match self.layout.lookup(lookup_index) {
            Some(lookup) => lookup,
            None => return false,
        };
        let mut locator = Locator::new();
        locator.reset(0, album.glyph_count());
        locator.set_filter(lookup.record.flag, &lookup.record.filter);
        locator.set_feature_mask(self.feature_mask.get());
        locator.jump_to(at);
        self.apply_subtables(&lookup, album, &mut locator)
    }

    fn apply_subtables(&self, lookup: &Lookup, album: &mut Album, locator: &mut Locator) -> bool {
        for subtable in lookup.subtables() {
            if self.apply_subtable(subtable.kind(), album, locator) {
                return true;
            }
        }
        false
    }

    fn apply_subtable(&self, kind: SubtableKind, album: &mut Album, locator: &mut Locator) -> bool {
        use SubtableKind::*;
        match kind {
            SingleSubst1(s) => subst::single1(s, album, locator, self.gdef),
            SingleSubst2(s) => subst::single2(s, album, locator, self.gdef),
            MultipleSubst1(s) => subst::multiple1(s, album, locator, self.gdef),
            AlternateSubst1(s) => {
                subst::alternate1(s, self.alternate_index.get(), album, locator, self.gdef)
            }
            LigatureSubst1(s) => subst::ligature1(s, album, locator, self.gdef),
            RevChainContext1(s) => subst::rev_chain_context1(s, self, album, locator),
            SeqContext1(s) => context::apply_seq_context1(s, self, album, locator),
            SeqContext2(s) => context::apply_seq_context2(s, self, album, locator),
            SeqContext3(s) => context::apply_seq_context3(s, self, album, locator),
            ChainContext1(s) => context::apply_chain_context1(s, self, album, locator),
            ChainContext2(s) => context::apply_chain_context2(s, self, album, locator),
            ChainContext3(s) => context::apply_chain_context3(s, self, album, locator),
            SinglePos1(s) => position::single1(s, album, locator),
            SinglePos2(s) => position::single2(s, album, locator),
            PairPos1(s) => position::pair1(s, album, locator, self.gdef),
            PairPos2(s) => position::pair2(s, album, locator, self.gdef),
            CursivePos1(s) => position::cursive1(s, album, locator, self.gdef),
            MarkPos1(s) => position::mark_to_base1(s, album, locator, self.gdef),
            MarkLigaturePos1(s) => position::mark_to_ligature1(s, album, locator, self.gdef),
            MarkMarkPos1(s) => position::mark_to_mark1(s, album, locator, self.gdef),
        }
    }
}
