//! Attachment resolver (component H).
//!
//! Cursive and mark-to-* positioning handlers leave each attached entry
//! holding a relative link (`offset.x`, an index delta to its attachment
//! target) and a local anchor delta (`position`, not yet including the
//! target's own position). This pass walks those links and folds each
//! target's resolved position into its dependents', left to right, once per
//! entry. [`GlyphTraits::RESOLVED`] keeps the walk idempotent: calling this
//! more than once on the same album is a no-op.

use super::album::{Album, GlyphTraits, Vector};

/// Resolves every attached entry's position against its target.
pub fn resolve_attachments(album: &mut Album) {
    for index in 0..album.glyph_count() {
        resolve_one(album, index);
    }
}

fn resolve_one(album: &mut Album, index: usize) -> Vector {
    let traits = album.traits(index);
    if traits.contains(GlyphTraits::RESOLVED) || !traits.contains(GlyphTraits::ATTACHED) {
        return album.position(index);
    }
    // Mark resolved before recursing: a malformed font with a cyclic
    // attachment chain then sees this entry as already resolved (at its
    // current, partially-applied position) rather than looping forever.
    let mut traits = traits;
    traits.insert(GlyphTraits::RESOLVED);
    album.set_traits(index, traits);

    let link = album.offset(index);
    let target = index as isize + link.x as isize;
    let count = album.glyph_count() as isize;
    let base = if target >= 0 && target < count && target as usize != index {
        resolve_one(album, target as usize)
    } else {
        Vector::ZERO
    };
    let resolved = base.add(album.position(index));
    album.set_position(index, resolved);
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Vector;

    #[test]
    fn resolves_single_mark_to_base() {
        let mut album = Album::new();
        album.begin_filling();
        album.add_glyph(10, GlyphTraits::BASE, 0);
        album.add_glyph(20, GlyphTraits::MARK, 1);
        album.end_filling();
        album.begin_arranging();
        album.set_position(0, Vector { x: 100, y: 0 });
        let mut traits = album.traits(1);
        traits.insert(GlyphTraits::ATTACHED);
        album.set_traits(1, traits);
        album.set_offset(1, Vector { x: -1, y: 0 });
        album.set_position(1, Vector { x: 5, y: 7 });

        resolve_attachments(&mut album);

        assert_eq!(album.position(1), Vector { x: 105, y: 7 });
        assert!(album.traits(1).contains(GlyphTraits::RESOLVED));
    }

    #[test]
    fn is_idempotent() {
        let mut album = Album::new();
        album.begin_filling();
        album.add_glyph(10, GlyphTraits::BASE, 0);
        album.add_glyph(20, GlyphTraits::MARK, 1);
        album.end_filling();
        album.begin_arranging();
        album.set_position(0, Vector { x: 50, y: 0 });
        let mut traits = album.traits(1);
        traits.insert(GlyphTraits::ATTACHED);
        album.set_traits(1, traits);
        album.set_offset(1, Vector { x: -1, y: 0 });
        album.set_position(1, Vector { x: 1, y: 2 });

        resolve_attachments(&mut album);
        let first = album.position(1);
        resolve_attachments(&mut album);
        assert_eq!(album.position(1), first);
    }

    #[test]
    fn untouched_entries_keep_zero_position() {
        let mut album = Album::new();
        album.begin_filling();
        album.add_glyph(10, GlyphTraits::BASE, 0);
        album.end_filling();
        album.begin_arranging();
        resolve_attachments(&mut album);
        assert_eq!(album.position(0), Vector::ZERO);
    }
}
