//! Pipeline orchestrator (component G) and the public shaping entry point
//! (component I).

use super::album::{Album, GlyphTraits, Vector};
use super::driver::Driver;
use super::pattern::Pattern;
use super::resolve::resolve_attachments;
use crate::otl::Gdef;
use crate::{Orientation, TableProvider};

/// Logical direction of a run of text.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

/// Order in which code points are consumed from the source text.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TextMode {
    Forward,
    /// Not yet implemented: always produces an empty album. See DESIGN.md.
    Backward,
}

/// Returns true for code points that Unicode marks default-ignorable:
/// variation selectors, joiners, and most format controls. A convenience
/// default for [`shape`]'s `zero_width` predicate.
pub fn is_default_ignorable(c: char) -> bool {
    matches!(c as u32,
        0x00AD | 0x034F | 0x061C
        | 0x115F..=0x1160
        | 0x17B4..=0x17B5
        | 0x180B..=0x180F
        | 0x200B..=0x200F
        | 0x202A..=0x202E
        | 0x2060..=0x206F
        | 0x3164
        | 0xFE00..=0xFE0F
        | 0xFEFF
        | 0xFFA0
        | 0xFFF0..=0xFFF8
        | 0x1BCA0..=0x1BCA3
        | 0x1D173..=0x1D17A
        | 0xE0000..=0xE0FFF
    )
}

/// Shapes `text` against `font` using `pattern`, writing the result into
/// `album`. `zero_width` classifies code points that must never carry a
/// visible advance; pass [`is_default_ignorable`] for the common case.
/// `zero_width_marks` additionally zeroes the advance of every combining
/// mark, a common requirement for correctly stacking diacritics.
pub fn shape<'a, F: TableProvider<'a>>(
    font: &F,
    text: &str,
    direction: TextDirection,
    mode: TextMode,
    pattern: &Pattern,
    zero_width: impl Fn(char) -> bool,
    zero_width_marks: bool,
    album: &mut Album,
) {
    let gdef = font.gdef();
    let rtl = direction == TextDirection::RightToLeft;

    album.begin_filling();
    discover(font, text, mode, rtl, &zero_width, gdef.as_ref(), album);
    if let Some(gsub) = font.gsub() {
        let driver = Driver::new(&gsub.0, gdef.as_ref());
        driver.apply_feature_range(pattern.gsub_units(), album);
    }
    album.end_filling();

    album.begin_arranging();
    assign_default_advances(font, album);
    if let Some(gpos) = font.gpos() {
        let driver = Driver::new(&gpos.0, gdef.as_ref());
        driver.apply_feature_range(pattern.gpos_units(), album);
        handle_zero_width(font, album);
        if zero_width_marks {
            make_marks_zero_width(album);
        }
        resolve_attachments(album);
    }
    album.end_arranging();

    album.wrap_up();
}

fn discover<'a, F: TableProvider<'a>>(
    font: &F,
    text: &str,
    mode: TextMode,
    rtl: bool,
    zero_width: &impl Fn(char) -> bool,
    gdef: Option<&Gdef>,
    album: &mut Album,
) {
    if mode == TextMode::Backward {
        return;
    }
    for (byte_index, ch) in text.char_indices() {
        let glyph = font.glyph_for_codepoint(ch as u32);
        let mut traits = gdef
            .map(|g| GlyphTraits::from_gdef_class(g.class(glyph)))
            .unwrap_or(GlyphTraits::NONE);
        if rtl {
            traits.insert(GlyphTraits::RIGHT_TO_LEFT);
        }
        if zero_width(ch) {
            traits.insert(GlyphTraits::DEFAULT_IGNORABLE);
        }
        album.add_glyph(glyph, traits, byte_index as u32);
    }
}

fn assign_default_advances<'a, F: TableProvider<'a>>(font: &F, album: &mut Album) {
    for i in 0..album.glyph_count() {
        let advance = if album.traits(i).contains(GlyphTraits::PLACEHOLDER) {
            0
        } else {
            font.advance_for_glyph(Orientation::Horizontal, album.glyph(i))
        };
        album.set_advance(i, Vector { x: advance, y: 0 });
    }
}

fn handle_zero_width<'a, F: TableProvider<'a>>(font: &F, album: &mut Album) {
    let space = font.glyph_for_codepoint(' ' as u32);
    for i in 0..album.glyph_count() {
        if album.traits(i).contains(GlyphTraits::DEFAULT_IGNORABLE) {
            album.set_glyph(i, space);
            album.set_position(i, Vector::ZERO);
            album.set_advance(i, Vector::ZERO);
        }
    }
}

fn make_marks_zero_width(album: &mut Album) {
    for i in 0..album.glyph_count() {
        if album.traits(i).contains(GlyphTraits::MARK) {
            album.set_advance(i, Vector::ZERO);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GlyphId, Tag};
    use crate::TableProvider;

    struct NoTables;

    impl<'a> TableProvider<'a> for NoTables {
        fn table_data(&self, _tag: Tag) -> Option<&'a [u8]> {
            None
        }
    }

    fn empty_pattern() -> Pattern {
        Pattern::default()
    }

    #[test]
    fn is_default_ignorable_covers_variation_selectors_and_zwj() {
        assert!(is_default_ignorable('\u{FE0F}'));
        assert!(is_default_ignorable('\u{200D}'));
        assert!(!is_default_ignorable('a'));
    }

    #[test]
    fn discovery_produces_one_entry_per_code_point() {
        let font = NoTables;
        let mut album = Album::new();
        shape(
            &font,
            "abc",
            TextDirection::LeftToRight,
            TextMode::Forward,
            &empty_pattern(),
            |_| false,
            false,
            &mut album,
        );
        assert_eq!(album.glyph_count(), 3);
        for i in 0..album.glyph_count() {
            assert_eq!(album.glyph(i), 0 as GlyphId);
            assert_eq!(album.advance(i), Vector::ZERO);
        }
    }

    #[test]
    fn backward_mode_produces_an_empty_album() {
        let font = NoTables;
        let mut album = Album::new();
        shape(
            &font,
            "abc",
            TextDirection::LeftToRight,
            TextMode::Backward,
            &empty_pattern(),
            |_| false,
            false,
            &mut album,
        );
        assert!(album.is_empty());
    }

    #[test]
    fn zero_width_predicate_collapses_to_the_space_glyph() {
        let font = NoTables;
        let mut album = Album::new();
        album.begin_filling();
        album.add_glyph(7, GlyphTraits::DEFAULT_IGNORABLE, 0);
        album.end_filling();
        album.begin_arranging();
        album.set_position(0, Vector { x: 1, y: 1 });
        album.set_advance(0, Vector { x: 100, y: 0 });
        handle_zero_width(&font, &mut album);
        assert_eq!(album.glyph(0), font.glyph_for_codepoint(' ' as u32));
        assert_eq!(album.advance(0), Vector::ZERO);
        assert_eq!(album.position(0), Vector::ZERO);
    }

    #[test]
    fn gpos_absent_skips_zero_width_collapse_and_mark_zeroing() {
        let font = NoTables;
        let mut album = Album::new();
        shape(
            &font,
            "a\u{200D}b",
            TextDirection::LeftToRight,
            TextMode::Forward,
            &empty_pattern(),
            |c| c == '\u{200D}',
            true,
            &mut album,
        );
        assert_eq!(album.glyph_count(), 3);
        assert_eq!(album.glyph(1), 0 as GlyphId);
    }

    #[test]
    fn zero_width_marks_zeroes_mark_advances() {
        let mut album = Album::new();
        album.begin_filling();
        album.add_glyph(5, GlyphTraits::MARK, 0);
        album.end_filling();
        album.begin_arranging();
        album.set_advance(0, Vector { x: 123, y: 0 });
        make_marks_zero_width(&mut album);
        assert_eq!(album.advance(0), Vector::ZERO);
    }
}
