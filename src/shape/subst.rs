//! GSUB subtable handlers (component E, substitution half).
//!
//! Each function here owns one subtable format: it checks coverage at the
//! locator's current position, applies the substitution if covered, and
//! returns whether it handled the glyph. The driver stops at the first
//! handler that returns `true`, mirroring how a lookup's subtables are
//! tried in order against a single position.

use super::album::{Album, GlyphTraits};
use super::context::{match_coverage_ahead, match_coverage_back};
use super::driver::Driver;
use super::locator::Locator;
use crate::otl::{
    AlternateSubst1, Gdef, LigatureSubst1, MultipleSubst1, RevChainContext1, SingleSubst1,
    SingleSubst2,
};
use alloc::vec::Vec;

fn class_bits() -> GlyphTraits {
    GlyphTraits::BASE | GlyphTraits::LIGATURE | GlyphTraits::MARK | GlyphTraits::COMPONENT
}

/// Refreshes the GDEF-derived classification of `index` after its glyph
/// identity changed, leaving every other trait bit untouched.
fn reclassify(album: &mut Album, gdef: Option<&Gdef>, index: usize, glyph: crate::types::GlyphId) {
    let mut traits = album.traits(index);
    traits.remove(class_bits());
    if let Some(gdef) = gdef {
        traits.insert(GlyphTraits::from_gdef_class(gdef.class(glyph)));
    }
    album.set_traits(index, traits);
}

pub(super) fn single1(
    subtable: SingleSubst1,
    album: &mut Album,
    locator: &mut Locator,
    gdef: Option<&Gdef>,
) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    let covered = match subtable.0.covered(glyph) {
        Some(c) => c,
        None => return false,
    };
    let replacement = match subtable.get(covered) {
        Some(r) => r,
        None => return false,
    };
    album.set_glyph(index, replacement);
    reclassify(album, gdef, index, replacement);
    true
}

pub(super) fn single2(
    subtable: SingleSubst2,
    album: &mut Album,
    locator: &mut Locator,
    gdef: Option<&Gdef>,
) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    let covered = match subtable.0.covered(glyph) {
        Some(c) => c,
        None => return false,
    };
    let replacement = match subtable.get(covered) {
        Some(r) => r,
        None => return false,
    };
    album.set_glyph(index, replacement);
    reclassify(album, gdef, index, replacement);
    true
}

pub(super) fn multiple1(
    subtable: MultipleSubst1,
    album: &mut Album,
    locator: &mut Locator,
    gdef: Option<&Gdef>,
) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    let covered = match subtable.0.covered(glyph) {
        Some(c) => c,
        None => return false,
    };
    let replacements = match subtable.get(covered) {
        Some(r) => r,
        None => return false,
    };
    let count = replacements.len();
    if count == 0 {
        album.placeholder(index);
        return true;
    }
    if count > 1 {
        album.reserve(index, count - 1);
    }
    for i in 0..count {
        if let Some(g) = replacements.get(i) {
            album.set_glyph(index + i, g);
            reclassify(album, gdef, index + i, g);
        }
    }
    true
}

pub(super) fn alternate1(
    subtable: AlternateSubst1,
    alternate_index: u16,
    album: &mut Album,
    locator: &mut Locator,
    gdef: Option<&Gdef>,
) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    let covered = match subtable.0.covered(glyph) {
        Some(c) => c,
        None => return false,
    };
    let alternates = match subtable.get(covered) {
        Some(a) => a,
        None => return false,
    };
    if alternates.is_empty() {
        return false;
    }
    let replacement = alternates
        .get(alternate_index as usize)
        .or_else(|| alternates.get(0));
    let replacement = match replacement {
        Some(g) => g,
        None => return false,
    };
    album.set_glyph(index, replacement);
    reclassify(album, gdef, index, replacement);
    true
}

pub(super) fn ligature1(
    subtable: LigatureSubst1,
    album: &mut Album,
    locator: &mut Locator,
    gdef: Option<&Gdef>,
) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    let covered = match subtable.0.covered(glyph) {
        Some(c) => c,
        None => return false,
    };
    let ligatures = match subtable.get(covered) {
        Some(l) => l,
        None => return false,
    };
    for lig in ligatures {
        let count = lig.trailing_components.len();
        let mut cursor = locator.clone();
        cursor.jump_to(index);
        let mut positions = Vec::with_capacity(count);
        let mut matched = true;
        for i in 0..count {
            if !cursor.move_next(album, gdef) {
                matched = false;
                break;
            }
            let pos = cursor.index();
            let expected = lig.trailing_components.get(i);
            if expected != Some(album.glyph(pos)) {
                matched = false;
                break;
            }
            positions.push(pos);
        }
        if !matched {
            continue;
        }
        let src = album.association(index);
        for pos in &positions {
            album.set_association(*pos, src);
            album.placeholder(*pos);
        }
        album.set_glyph(index, lig.ligature);
        reclassify(album, gdef, index, lig.ligature);
        let mut traits = album.traits(index);
        traits.insert(GlyphTraits::LIGATURE);
        album.set_traits(index, traits);
        return true;
    }
    false
}

pub(super) fn rev_chain_context1(
    subtable: RevChainContext1,
    driver: &Driver,
    album: &mut Album,
    locator: &mut Locator,
) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    let coverage_index = match subtable.0.coverage_index(glyph) {
        Some(c) => c,
        None => return false,
    };
    let rule = match subtable.rule() {
        Some(r) => r,
        None => return false,
    };
    let gdef = driver.gdef();
    if !match_coverage_back(album, gdef, locator, index, rule.backtrack) {
        return false;
    }
    if !match_coverage_ahead(album, gdef, locator, index, rule.lookahead) {
        return false;
    }
    let replacement = match rule.substitutions.get(coverage_index as usize) {
        Some(g) => g,
        None => return false,
    };
    album.set_glyph(index, replacement);
    reclassify(album, gdef, index, replacement);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reclassify_without_gdef_clears_class_bits() {
        let mut album = Album::new();
        album.begin_filling();
        album.add_glyph(1, GlyphTraits::MARK | GlyphTraits::ATTACHED, 0);
        album.end_filling();

        reclassify(&mut album, None, 0, 2);

        let traits = album.traits(0);
        assert!(!traits.contains(GlyphTraits::MARK));
        assert!(traits.contains(GlyphTraits::ATTACHED));
    }

    #[test]
    fn reclassify_preserves_non_class_bits() {
        let mut album = Album::new();
        album.begin_filling();
        album.add_glyph(
            1,
            GlyphTraits::BASE | GlyphTraits::RIGHT_TO_LEFT | GlyphTraits::DEFAULT_IGNORABLE,
            0,
        );
        album.end_filling();

        reclassify(&mut album, None, 0, 2);

        let traits = album.traits(0);
        assert!(!traits.contains(GlyphTraits::BASE));
        assert!(traits.contains(GlyphTraits::RIGHT_TO_LEFT));
        assert!(traits.contains(GlyphTraits::DEFAULT_IGNORABLE));
    }
}
