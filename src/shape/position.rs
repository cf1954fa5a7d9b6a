//! GPOS subtable handlers (component E, positioning half).
//!
//! Each function checks coverage at the locator's current position, applies
//! the positioning adjustment if covered, and returns whether it handled the
//! glyph, mirroring the substitution handlers in [`super::subst`].

use super::album::{Album, GlyphTraits, Vector};
use super::locator::Locator;
use crate::otl::{
    Anchor, CursivePos1, Gdef, LookupFlag, MarkLigaturePos1, MarkMarkPos1, MarkPos1, PairPos1,
    PairPos2, SinglePos1, SinglePos2, Value,
};

fn apply_value(album: &mut Album, index: usize, value: Value) {
    let mut position = album.position(index);
    let mut advance = album.advance(index);
    position.x += value.x.value as i32;
    position.y += value.y.value as i32;
    advance.x += value.x_advance.value as i32;
    advance.y += value.y_advance.value as i32;
    album.set_position(index, position);
    album.set_advance(index, advance);
}

fn anchor_delta(target: Anchor, attached: Anchor) -> (i32, i32) {
    (
        target.x.value as i32 - attached.x.value as i32,
        target.y.value as i32 - attached.y.value as i32,
    )
}

/// Links `index` to `target`: records the relative offset the attachment
/// resolver will follow and the local anchor delta it will add to the
/// target's resolved position, and zeroes the attached glyph's own advance.
fn attach(album: &mut Album, index: usize, target: usize, dx: i32, dy: i32) {
    let mut traits = album.traits(index);
    traits.insert(GlyphTraits::ATTACHED);
    album.set_traits(index, traits);
    album.set_offset(index, Vector { x: target as i32 - index as i32, y: 0 });
    album.set_position(index, Vector { x: dx, y: dy });
    album.set_advance(index, Vector::ZERO);
}

fn find_next(album: &Album, gdef: Option<&Gdef>, locator: &Locator, index: usize) -> Option<usize> {
    let mut cursor = locator.clone();
    cursor.jump_to(index);
    if cursor.move_next(album, gdef) {
        Some(cursor.index())
    } else {
        None
    }
}

/// Searches backward, ignoring intervening marks, for the nearest glyph
/// carrying `trait_bit` (a base or a ligature).
fn find_base(
    album: &Album,
    gdef: Option<&Gdef>,
    locator: &Locator,
    index: usize,
    trait_bit: GlyphTraits,
) -> Option<usize> {
    let mut cursor = locator.clone();
    cursor.set_lookup_flag(LookupFlag(0));
    cursor.jump_to(index);
    loop {
        if !cursor.move_previous(album, gdef) {
            return None;
        }
        let i = cursor.index();
        let traits = album.traits(i);
        if traits.contains(trait_bit) {
            return Some(i);
        }
        if !traits.contains(GlyphTraits::MARK) {
            return None;
        }
    }
}

/// Returns the immediately preceding glyph if (and only if) it is itself a
/// mark, for mark-to-mark attachment.
fn find_adjacent_mark(
    album: &Album,
    gdef: Option<&Gdef>,
    locator: &Locator,
    index: usize,
) -> Option<usize> {
    let mut cursor = locator.clone();
    cursor.set_lookup_flag(LookupFlag(0));
    cursor.jump_to(index);
    if cursor.move_previous(album, gdef) {
        let i = cursor.index();
        if album.traits(i).contains(GlyphTraits::MARK) {
            return Some(i);
        }
    }
    None
}

pub(super) fn single1(subtable: SinglePos1, album: &mut Album, locator: &mut Locator) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    let covered = match subtable.0.covered(glyph) {
        Some(c) => c,
        None => return false,
    };
    let value = match subtable.get(covered) {
        Some(v) => v,
        None => return false,
    };
    apply_value(album, index, value);
    true
}

pub(super) fn single2(subtable: SinglePos2, album: &mut Album, locator: &mut Locator) -> bool {
    let index = locator.index();
    let glyph = album.glyph(index);
    let covered = match subtable.0.covered(glyph) {
        Some(c) => c,
        None => return false,
    };
    let value = match subtable.get(covered) {
        Some(v) => v,
        None => return false,
    };
    apply_value(album, index, value);
    true
}

pub(super) fn pair1(
    subtable: PairPos1,
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
    let next = match find_next(album, gdef, locator, index) {
        Some(i) => i,
        None => return false,
    };
    let next_glyph = album.glyph(next);
    let [first, second] = match subtable.get(covered, next_glyph) {
        Some(v) => v,
        None => return false,
    };
    if let Some(v) = first {
        apply_value(album, index, v);
    }
    if let Some(v) = second {
        apply_value(album, next, v);
        locator.jump_to(next);
    }
    true
}

pub(super) fn pair2(
    subtable: PairPos2,
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
    let next = match find_next(album, gdef, locator, index) {
        Some(i) => i,
        None => return false,
    };
    let next_glyph = album.glyph(next);
    let [first, second] = match subtable.get(covered, next_glyph) {
        Some(v) => v,
        None => return false,
    };
    if let Some(v) = first {
        apply_value(album, index, v);
    }
    if let Some(v) = second {
        apply_value(album, next, v);
        locator.jump_to(next);
    }
    true
}

pub(super) fn cursive1(
    subtable: CursivePos1,
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
    let exit = match subtable.exit(covered) {
        Some(a) => a,
        None => return false,
    };
    let next = match find_next(album, gdef, locator, index) {
        Some(i) => i,
        None => return false,
    };
    let next_glyph = album.glyph(next);
    let next_covered = match subtable.0.covered(next_glyph) {
        Some(c) => c,
        None => return false,
    };
    let entry = match subtable.entry(next_covered) {
        Some(a) => a,
        None => return false,
    };
    let (dx, dy) = anchor_delta(exit, entry);
    attach(album, next, index, dx, dy);
    true
}

pub(super) fn mark_to_base1(
    subtable: MarkPos1,
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
    let base_index = match find_base(album, gdef, locator, index, GlyphTraits::BASE) {
        Some(i) => i,
        None => return false,
    };
    let base_glyph = album.glyph(base_index);
    let [base_anchor, mark_anchor] = match subtable.get(base_glyph, covered) {
        Some(a) => a,
        None => return false,
    };
    let (dx, dy) = anchor_delta(base_anchor, mark_anchor);
    attach(album, index, base_index, dx, dy);
    true
}

pub(super) fn mark_to_ligature1(
    subtable: MarkLigaturePos1,
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
    let lig_index = match find_base(album, gdef, locator, index, GlyphTraits::LIGATURE) {
        Some(i) => i,
        None => return false,
    };
    let lig_glyph = album.glyph(lig_index);
    // Component index fixed at 0: see DESIGN.md's mark-to-ligature note.
    let [base_anchor, mark_anchor] = match subtable.get(lig_glyph, 0, covered) {
        Some(a) => a,
        None => return false,
    };
    let (dx, dy) = anchor_delta(base_anchor, mark_anchor);
    attach(album, index, lig_index, dx, dy);
    true
}

pub(super) fn mark_to_mark1(
    subtable: MarkMarkPos1,
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
    let base_index = match find_adjacent_mark(album, gdef, locator, index) {
        Some(i) => i,
        None => return false,
    };
    let base_glyph = album.glyph(base_index);
    let [base_anchor, mark_anchor] = match subtable.get(base_glyph, covered) {
        Some(a) => a,
        None => return false,
    };
    let (dx, dy) = anchor_delta(base_anchor, mark_anchor);
    attach(album, index, base_index, dx, dy);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::otl::Component;

    fn component(value: i16) -> Component {
        Component {
            value,
            delta_indices: None,
        }
    }

    fn anchor(x: i16, y: i16) -> Anchor {
        Anchor {
            x: component(x),
            y: component(y),
        }
    }

    fn value(x_advance: i16) -> Value {
        Value {
            x_advance: component(x_advance),
            ..Default::default()
        }
    }

    fn marks_and_base() -> Album {
        let mut album = Album::new();
        album.begin_filling();
        album.add_glyph(10, GlyphTraits::BASE, 0);
        album.add_glyph(20, GlyphTraits::MARK, 1);
        album.add_glyph(30, GlyphTraits::MARK, 2);
        album.end_filling();
        album.begin_arranging();
        album
    }

    #[test]
    fn anchor_delta_computes_the_difference() {
        assert_eq!(anchor_delta(anchor(100, 50), anchor(10, 5)), (90, 45));
    }

    #[test]
    fn apply_value_accumulates_onto_existing_position() {
        let mut album = marks_and_base();
        album.set_advance(0, Vector { x: 500, y: 0 });
        apply_value(&mut album, 0, value(20));
        assert_eq!(album.advance(0), Vector { x: 520, y: 0 });
    }

    #[test]
    fn attach_records_a_relative_link_and_zeroes_advance() {
        let mut album = marks_and_base();
        album.set_advance(1, Vector { x: 300, y: 0 });
        attach(&mut album, 1, 0, 7, 9);
        assert!(album.traits(1).contains(GlyphTraits::ATTACHED));
        assert_eq!(album.offset(1), Vector { x: -1, y: 0 });
        assert_eq!(album.position(1), Vector { x: 7, y: 9 });
        assert_eq!(album.advance(1), Vector::ZERO);
    }

    #[test]
    fn find_base_skips_over_intervening_marks() {
        let album = marks_and_base();
        let mut locator = Locator::new();
        locator.reset(0, album.glyph_count());
        assert_eq!(find_base(&album, None, &locator, 2, GlyphTraits::BASE), Some(0));
    }

    #[test]
    fn find_base_stops_at_a_non_mark_non_base_glyph() {
        let mut album = Album::new();
        album.begin_filling();
        album.add_glyph(1, GlyphTraits::NONE, 0);
        album.add_glyph(2, GlyphTraits::MARK, 1);
        album.end_filling();
        album.begin_arranging();
        let mut locator = Locator::new();
        locator.reset(0, album.glyph_count());
        assert_eq!(find_base(&album, None, &locator, 1, GlyphTraits::BASE), None);
    }

    #[test]
    fn find_adjacent_mark_requires_immediate_adjacency() {
        let album = marks_and_base();
        let mut locator = Locator::new();
        locator.reset(0, album.glyph_count());
        assert_eq!(find_adjacent_mark(&album, None, &locator, 2), Some(1));
        assert_eq!(find_adjacent_mark(&album, None, &locator, 1), None);
    }

    #[test]
    fn find_next_returns_the_next_eligible_glyph() {
        let album = marks_and_base();
        let mut locator = Locator::new();
        locator.reset(0, album.glyph_count());
        assert_eq!(find_next(&album, None, &locator, 0), Some(1));
    }
}
