//! Sequence/chain-context matching shared by GSUB Types 5/6 and GPOS
//! Types 7/8.
//!
//! Matching walks a cloned [`Locator`] so the caller's traversal position is
//! left untouched. A successful match hands the matched input positions to
//! [`apply_nested`], which applies each rule's nested lookups at the
//! sequence index the rule names.

use super::album::Album;
use super::driver::Driver;
use super::locator::Locator;
use crate::otl::{
    ChainContext1, ChainContext2, ChainContext3, ClassDef, CoverageArray, Gdef, GlyphClass,
    NestedLookup, SeqContext1, SeqContext2, SeqContext3,
};
use crate::parse::Slice;
use crate::types::GlyphId;
use alloc::vec::Vec;

pub(super) fn apply_seq_context1(
    subtable: SeqContext1,
    driver: &Driver,
    album: &mut Album,
    locator: &mut Locator,
) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    let covered = match subtable.0.covered(glyph) {
        Some(c) => c,
        None => return false,
    };
    let rule_set = match subtable.get(covered) {
        Some(r) => r,
        None => return false,
    };
    let gdef = driver.gdef();
    for rule in rule_set.iter() {
        if let Some(positions) = match_glyphs(album, gdef, locator, index, rule.input) {
            apply_nested(driver, album, index, &positions, rule.lookups);
            return true;
        }
    }
    false
}

pub(super) fn apply_seq_context2(
    subtable: SeqContext2,
    driver: &Driver,
    album: &mut Album,
    locator: &mut Locator,
) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    let covered = match subtable.0.covered(glyph) {
        Some(c) => c,
        None => return false,
    };
    let rule_set = match subtable.get(covered) {
        Some(r) => r,
        None => return false,
    };
    let classes = subtable.input();
    let gdef = driver.gdef();
    for rule in rule_set.iter() {
        if let Some(positions) = match_classes(album, gdef, locator, index, rule.input, &classes) {
            apply_nested(driver, album, index, &positions, rule.lookups);
            return true;
        }
    }
    false
}

pub(super) fn apply_seq_context3(
    subtable: SeqContext3,
    driver: &Driver,
    album: &mut Album,
    locator: &mut Locator,
) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    if subtable.0.covered(glyph).is_none() {
        return false;
    }
    let rule = match subtable.rule() {
        Some(r) => r,
        None => return false,
    };
    let gdef = driver.gdef();
    match match_coverage_from(album, gdef, locator, index, rule.input, 1) {
        Some(positions) => {
            apply_nested(driver, album, index, &positions, rule.lookups);
            true
        }
        None => false,
    }
}

pub(super) fn apply_chain_context1(
    subtable: ChainContext1,
    driver: &Driver,
    album: &mut Album,
    locator: &mut Locator,
) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    let covered = match subtable.0.covered(glyph) {
        Some(c) => c,
        None => return false,
    };
    let rule_set = match subtable.get(covered) {
        Some(r) => r,
        None => return false,
    };
    let gdef = driver.gdef();
    for rule in rule_set.iter() {
        if !match_glyphs_back(album, gdef, locator, index, rule.backtrack) {
            continue;
        }
        let positions = match match_glyphs(album, gdef, locator, index, rule.input) {
            Some(p) => p,
            None => continue,
        };
        let end = positions.last().copied().unwrap_or(index);
        if !match_glyphs_ahead(album, gdef, locator, end, rule.lookahead) {
            continue;
        }
        apply_nested(driver, album, index, &positions, rule.lookups);
        return true;
    }
    false
}

pub(super) fn apply_chain_context2(
    subtable: ChainContext2,
    driver: &Driver,
    album: &mut Album,
    locator: &mut Locator,
) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    let covered = match subtable.0.covered(glyph) {
        Some(c) => c,
        None => return false,
    };
    let rule_set = match subtable.get(covered) {
        Some(r) => r,
        None => return false,
    };
    let backtrack_classes = subtable.backtrack();
    let input_classes = subtable.input();
    let lookahead_classes = subtable.lookahead();
    let gdef = driver.gdef();
    for rule in rule_set.iter() {
        if !match_classes_back(album, gdef, locator, index, rule.backtrack, &backtrack_classes) {
            continue;
        }
        let positions = match match_classes(album, gdef, locator, index, rule.input, &input_classes)
        {
            Some(p) => p,
            None => continue,
        };
        let end = positions.last().copied().unwrap_or(index);
        if !match_classes_ahead(album, gdef, locator, end, rule.lookahead, &lookahead_classes) {
            continue;
        }
        apply_nested(driver, album, index, &positions, rule.lookups);
        return true;
    }
    false
}

pub(super) fn apply_chain_context3(
    subtable: ChainContext3,
    driver: &Driver,
    album: &mut Album,
    locator: &mut Locator,
) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    if subtable.0.covered(glyph).is_none() {
        return false;
    }
    let rule = match subtable.rule() {
        Some(r) => r,
        None => return false,
    };
    let gdef = driver.gdef();
    if !match_coverage_back(album, gdef, locator, index, rule.backtrack) {
        return false;
    }
    let positions = match match_coverage_from(album, gdef, locator, index, rule.input, 1) {
        Some(p) => p,
        None => return false,
    };
    let end = positions.last().copied().unwrap_or(index);
    if !match_coverage_ahead(album, gdef, locator, end, rule.lookahead) {
        return false;
    }
    apply_nested(driver, album, index, &positions, rule.lookups);
    true
}

fn apply_nested(
    driver: &Driver,
    album: &mut Album,
    start: usize,
    positions: &[usize],
    lookups: Slice<NestedLookup>,
) {
    for nl in lookups.iter() {
        let sequence_index = nl.sequence_index as usize;
        let at = if sequence_index == 0 {
            Some(start)
        } else {
            positions.get(sequence_index - 1).copied()
        };
        if let Some(at) = at {
            driver.apply_lookup(nl.lookup_index, album, at);
        }
    }
}

fn match_glyphs(
    album: &Album,
    gdef: Option<&Gdef>,
    locator: &Locator,
    start: usize,
    input: Slice<GlyphId>,
) -> Option<Vec<usize>> {
    walk_forward(album, gdef, locator, start, input.len(), |i, g| {
        input.get(i) == Some(g)
    })
}

fn match_classes(
    album: &Album,
    gdef: Option<&Gdef>,
    locator: &Locator,
    start: usize,
    input: Slice<GlyphClass>,
    classes: &ClassDef,
) -> Option<Vec<usize>> {
    walk_forward(album, gdef, locator, start, input.len(), |i, g| {
        input.get(i) == Some(classes.get(g))
    })
}

fn match_coverage_from(
    album: &Album,
    gdef: Option<&Gdef>,
    locator: &Locator,
    start: usize,
    input: CoverageArray,
    skip: usize,
) -> Option<Vec<usize>> {
    let count = input.len().saturating_sub(skip);
    walk_forward(album, gdef, locator, start, count, |i, g| {
        input
            .get(skip + i)
            .map(|cov| cov.get(g).is_some())
            .unwrap_or(false)
    })
}

fn match_glyphs_back(
    album: &Album,
    gdef: Option<&Gdef>,
    locator: &Locator,
    start: usize,
    backtrack: Slice<GlyphId>,
) -> bool {
    walk_backward(album, gdef, locator, start, backtrack.len(), |i, g| {
        backtrack.get(i) == Some(g)
    })
}

fn match_classes_back(
    album: &Album,
    gdef: Option<&Gdef>,
    locator: &Locator,
    start: usize,
    backtrack: Slice<GlyphClass>,
    classes: &ClassDef,
) -> bool {
    walk_backward(album, gdef, locator, start, backtrack.len(), |i, g| {
        backtrack.get(i) == Some(classes.get(g))
    })
}

pub(super) fn match_coverage_back(
    album: &Album,
    gdef: Option<&Gdef>,
    locator: &Locator,
    start: usize,
    backtrack: CoverageArray,
) -> bool {
    walk_backward(album, gdef, locator, start, backtrack.len(), |i, g| {
        backtrack
            .get(i)
            .map(|cov| cov.get(g).is_some())
            .unwrap_or(false)
    })
}

fn match_glyphs_ahead(
    album: &Album,
    gdef: Option<&Gdef>,
    locator: &Locator,
    start: usize,
    lookahead: Slice<GlyphId>,
) -> bool {
    walk_forward(album, gdef, locator, start, lookahead.len(), |i, g| {
        lookahead.get(i) == Some(g)
    })
    .is_some()
}

fn match_classes_ahead(
    album: &Album,
    gdef: Option<&Gdef>,
    locator: &Locator,
    start: usize,
    lookahead: Slice<GlyphClass>,
    classes: &ClassDef,
) -> bool {
    walk_forward(album, gdef, locator, start, lookahead.len(), |i, g| {
        lookahead.get(i) == Some(classes.get(g))
    })
    .is_some()
}

pub(super) fn match_coverage_ahead(
    album: &Album,
    gdef: Option<&Gdef>,
    locator: &Locator,
    start: usize,
    lookahead: CoverageArray,
) -> bool {
    walk_forward(album, gdef, locator, start, lookahead.len(), |i, g| {
        lookahead
            .get(i)
            .map(|cov| cov.get(g).is_some())
            .unwrap_or(false)
    })
    .is_some()
}

fn walk_forward(
    album: &Album,
    gdef: Option<&Gdef>,
    locator: &Locator,
    start: usize,
    count: usize,
    mut test: impl FnMut(usize, GlyphId) -> bool,
) -> Option<Vec<usize>> {
    let mut cursor = locator.clone();
    cursor.jump_to(start);
    let mut positions = Vec::with_capacity(count);
    for i in 0..count {
        if !cursor.move_next(album, gdef) {
            return None;
        }
        let pos = cursor.index();
        if !test(i, album.glyph(pos)) {
            return None;
        }
        positions.push(pos);
    }
    Some(positions)
}

fn walk_backward(
    album: &Album,
    gdef: Option<&Gdef>,
    locator: &Locator,
    start: usize,
    count: usize,
    mut test: impl FnMut(usize, GlyphId) -> bool,
) -> bool {
    let mut cursor = locator.clone();
    cursor.jump_to(start);
    for i in 0..count {
        if !cursor.move_previous(album, gdef) {
            return false;
        }
        if !test(i, album.glyph(cursor.index())) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::album::GlyphTraits;

    fn album(glyphs: &[GlyphId]) -> Album {
        let mut album = Album::new();
        album.begin_filling();
        for (i, &g) in glyphs.iter().enumerate() {
            album.add_glyph(g, GlyphTraits::NONE, i as u32);
        }
        album.end_filling();
        album
    }

    fn glyph_slice(glyphs: &[u16]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(glyphs.len() * 2);
        for g in glyphs {
            bytes.extend_from_slice(&g.to_be_bytes());
        }
        bytes
    }

    #[test]
    fn walk_forward_matches_exact_sequence() {
        let album = album(&[1, 2, 3, 4]);
        let mut locator = Locator::new();
        locator.reset(0, album.glyph_count());
        let positions = walk_forward(&album, None, &locator, 0, 3, |i, g| {
            g == [2, 3, 4][i]
        });
        assert_eq!(positions, Some(alloc::vec![1, 2, 3]));
    }

    #[test]
    fn walk_forward_fails_on_mismatch() {
        let album = album(&[1, 2, 3]);
        let mut locator = Locator::new();
        locator.reset(0, album.glyph_count());
        let positions = walk_forward(&album, None, &locator, 0, 2, |_, g| g == 9);
        assert_eq!(positions, None);
    }

    #[test]
    fn walk_forward_fails_when_run_out_of_glyphs() {
        let album = album(&[1, 2]);
        let mut locator = Locator::new();
        locator.reset(0, album.glyph_count());
        let positions = walk_forward(&album, None, &locator, 0, 3, |_, _| true);
        assert_eq!(positions, None);
    }

    #[test]
    fn walk_backward_matches_preceding_glyphs() {
        let album = album(&[5, 6, 7, 8]);
        let mut locator = Locator::new();
        locator.reset(0, album.glyph_count());
        let matched = walk_backward(&album, None, &locator, 3, 2, |i, g| {
            g == [7, 6][i]
        });
        assert!(matched);
    }

    #[test]
    fn match_glyphs_uses_a_raw_slice() {
        let album = album(&[10, 20, 30]);
        let bytes = glyph_slice(&[20, 30]);
        let input = Slice::<GlyphId>::new(&bytes);
        let mut locator = Locator::new();
        locator.reset(0, album.glyph_count());
        assert_eq!(match_glyphs(&album, None, &locator, 0, input), Some(alloc::vec![1, 2]));
    }
}
