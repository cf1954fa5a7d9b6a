//! Precomputed, immutable shaping plan.
//!
//! A [`Pattern`] resolves a script, an optional language, and a caller
//! supplied list of typographic features into two ordered lists of feature
//! units: one driving the GSUB (substitution) stage and one driving the
//! GPOS (positioning) stage. Each unit pairs a bit of a caller-defined
//! feature mask with the lookup indices the feature activates, in the order
//! the font itself lists them. Building a pattern touches only the font's
//! layout tables; applying it never mutates the pattern, so a single
//! instance may be reused across many shaping calls for the same
//! script/language/feature combination.

use crate::gpos::Gpos;
use crate::gsub::Gsub;
use crate::types::Tag;
use alloc::vec::Vec;

/// One typographic feature resolved against a script and language, together
/// with the mask bit that enables it.
#[derive(Clone, Debug)]
pub struct FeatureUnit {
    /// Tag of the feature, as requested by the caller.
    pub tag: Tag,
    /// Bit mask identifying this feature among the caller's requested set.
    pub mask: u16,
    /// Indices, into the owning table's lookup list, activated by this
    /// feature, in font order.
    pub lookup_indices: Vec<u16>,
    /// Selector applied by an Alternate Substitution (GSUB Type 3) subtable
    /// reached through this unit. Zero selects the first alternate.
    pub alternate_index: u16,
}

/// Ordered GSUB and GPOS feature units for a single script/language.
#[derive(Clone, Debug, Default)]
pub struct Pattern {
    gsub_units: Vec<FeatureUnit>,
    gpos_units: Vec<FeatureUnit>,
}

impl Pattern {
    /// Builds a pattern for the given script and language (or the script's
    /// default language system if `language` is `None`), activating every
    /// feature in `features` that the script/language exposes.
    ///
    /// `features` pairs a feature tag with the mask bit the caller wants to
    /// associate with it; a tag absent from the script/language is silently
    /// skipped, matching the error handling convention that missing tables
    /// never surface as errors.
    pub fn new<'a>(
        gsub: Option<&Gsub<'a>>,
        gpos: Option<&Gpos<'a>>,
        script: Tag,
        language: Option<Tag>,
        features: &[(Tag, u16)],
    ) -> Self {
        Self {
            gsub_units: gsub
                .map(|table| Self::collect(&table.0, script, language, features))
                .unwrap_or_default(),
            gpos_units: gpos
                .map(|table| Self::collect(&table.0, script, language, features))
                .unwrap_or_default(),
        }
    }

    fn collect<'a>(
        layout: &'a crate::otl::Layout<'a>,
        script: Tag,
        language: Option<Tag>,
        features: &[(Tag, u16)],
    ) -> Vec<FeatureUnit> {
        let script = match layout
            .scripts()
            .find(|s| s.record.tag == script)
            .or_else(|| layout.scripts().find(|s| s.record.tag == Tag::new(b"DFLT")))
        {
            Some(script) => script,
            None => return Vec::new(),
        };
        let lang = language
            .and_then(|tag| script.languages().find(|l| l.record.tag == tag))
            .or_else(|| script.default_language())
            .or_else(|| script.language(0));
        let lang = match lang {
            Some(lang) => lang,
            None => return Vec::new(),
        };
        let mut units = Vec::new();
        for feature in lang.features() {
            if let Some((tag, mask)) = features.iter().find(|(tag, _)| *tag == feature.record.tag)
            {
                units.push(FeatureUnit {
                    tag: *tag,
                    mask: *mask,
                    lookup_indices: feature.lookup_indices().iter().collect(),
                    alternate_index: 0,
                });
            }
        }
        units
    }

    /// Returns the feature units that drive the substitution stage, in
    /// application order.
    pub fn gsub_units(&self) -> &[FeatureUnit] {
        &self.gsub_units
    }

    /// Returns the feature units that drive the positioning stage, in
    /// application order.
    pub fn gpos_units(&self) -> &[FeatureUnit] {
        &self.gpos_units
    }

    /// Returns true if the pattern has no substitution lookups to run.
    pub fn is_gsub_empty(&self) -> bool {
        self.gsub_units.iter().all(|u| u.lookup_indices.is_empty())
    }

    /// Returns true if the pattern has no positioning lookups to run.
    pub fn is_gpos_empty(&self) -> bool {
        self.gpos_units.iter().all(|u| u.lookup_indices.is_empty())
    }

    /// Sets the alternate selector for every GSUB feature unit matching
    /// `tag`. A no-op if the pattern has no such unit.
    pub fn set_alternate_index(&mut self, tag: Tag, alternate_index: u16) {
        for unit in self.gsub_units.iter_mut().filter(|u| u.tag == tag) {
            unit.alternate_index = alternate_index;
        }
    }
}
