use super::shared::*;
use crate::parse_prelude::*;
use crate::var::ItemVariationStore;

/// Glyph definition table.
///
/// <https://docs.microsoft.com/en-us/typography/opentype/spec/gdef>
#[derive(Copy, Clone)]
pub struct Gdef<'a> {
    data: Buffer<'a>,
    classes: u16,
    mark_classes: u16,
    mark_sets: u16,
    var_store: u32,
}

impl<'a> Gdef<'a> {
    /// Creates a new glyph definition table from the specified table data.
    pub fn new(data: &'a [u8]) -> Option<Self> {
        let b = Buffer::new(data);
        let major = b.read::<u16>(0)?;
        let minor = b.read::<u16>(2)?;
        let classes = b.read::<u16>(4)?;
        let mark_classes = b.read::<u16>(10)?;
        let mark_sets = if major > 1 || minor >= 2 {
            b.read_or_default::<u16>(12)
        } else {
            0
        };
        let var_store = if major > 1 || minor >= 3 {
            b.read_or_default::<u32>(14)
        } else {
            0
        };
        Some(Self {
            data: b,
            classes,
            mark_classes,
            mark_sets,
            var_store,
        })
    }

    /// Returns true if glyph classes are available.
    pub fn has_classes(&self) -> bool {
        self.classes != 0
    }

    /// Returns the glyph class for the specified glyph.
    ///
    /// Class values follow the OpenType convention: 1 = base, 2 = ligature,
    /// 3 = mark, 4 = component.
    pub fn class(&self, glyph_id: u16) -> u16 {
        get_class(&self.data, self.classes as u32, glyph_id)
    }

    /// Returns the glyph class definition table.
    pub fn classes(&self) -> Option<ClassDef<'a>> {
        if self.classes != 0 {
            Some(ClassDef::new(self.data, self.classes as u32))
        } else {
            None
        }
    }

    /// Returns true if mark attachment classes are available.
    pub fn has_mark_classes(&self) -> bool {
        self.mark_classes != 0
    }

    /// Returns the mark attachment class for the specified glyph.
    pub fn mark_class(&self, glyph_id: u16) -> u16 {
        get_class(&self.data, self.mark_classes as u32, glyph_id)
    }

    /// Returns the mark attachment class definition table.
    pub fn mark_classes(&self) -> Option<ClassDef<'a>> {
        if self.mark_classes != 0 {
            Some(ClassDef::new(self.data, self.mark_classes as u32))
        } else {
            None
        }
    }

    /// Returns true if mark filtering sets are available.
    pub fn has_mark_sets(&self) -> bool {
        self.mark_sets != 0
    }

    /// Returns the number of available mark filtering sets.
    pub fn num_mark_sets(&self) -> u16 {
        if self.mark_sets != 0 {
            self.data
                .read::<u16>(self.mark_sets as usize + 2)
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Returns the mark filtering set at the specified index.
    pub fn mark_set(&self, index: u16) -> Option<Coverage<'a>> {
        Some(Coverage::new(self.data, self.mark_set_offset(index)?))
    }

    /// Returns an iterator over the mark filtering sets.
    pub fn mark_sets(&self) -> impl Iterator<Item = Coverage<'a>> + '_ + Clone {
        let len = self.num_mark_sets();
        (0..len).map(move |index| {
            let offset = self.mark_set_offset(index).unwrap_or(0);
            Coverage::new(self.data, offset)
        })
    }

    /// Returns true if the glyph belongs to the specified mark filtering set.
    pub fn mark_set_contains(&self, set_index: u16, glyph_id: u16) -> bool {
        match self.mark_set_offset(set_index) {
            Some(offset) => unsafe { _get_coverage_unchecked(&self.data, offset, glyph_id) }
                .is_some(),
            None => false,
        }
    }

    /// Returns true if the glyph belongs to the mark filtering set at the
    /// given absolute offset, as produced by [`Self::mark_set_offset`].
    ///
    /// Used by lookup filters that cache the resolved offset up front rather
    /// than re-resolving a set index on every glyph.
    pub(crate) fn mark_set_contains_at_offset(&self, offset: u32, glyph_id: u16) -> bool {
        if offset == 0 {
            return false;
        }
        unsafe { _get_coverage_unchecked(&self.data, offset, glyph_id) }.is_some()
    }

    /// Returns true if variations are supported.
    pub fn supports_variations(&self) -> bool {
        self.var_store != 0
    }

    /// Returns the item variation store.
    pub fn variations(&self) -> Option<ItemVariationStore<'a>> {
        if self.var_store != 0 {
            ItemVariationStore::new(self.data, self.var_store)
        } else {
            None
        }
    }

    pub(super) fn mark_set_offset(&self, set_index: u16) -> Option<u32> {
        if self.mark_sets == 0 {
            return None;
        }
        let set = set_index as usize;
        let b = &self.data;
        let sets_base = self.mark_sets as usize;
        let len = b.read::<u16>(sets_base + 2)? as usize;
        if set >= len {
            return None;
        }
        let offset = b.read::<u32>(sets_base + 4 + set * 4)?;
        let set_offset = sets_base as u32 + offset;
        if offset != 0 && validate_coverage(b, set_offset).is_some() {
            return Some(set_offset);
        }
        None
    }
}
