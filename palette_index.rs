use std::sync::Arc;

use log::debug;

use crate::colors::{distance, Color};

/// Number of ranked results returned when the caller does not ask otherwise.
pub const DEFAULT_LIMIT: usize = 99;

#[derive(Clone, PartialEq, Debug)]
pub struct PaletteEntry {
    name: String,
    color: Color,
}

impl PaletteEntry {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        PaletteEntry { name: name.into(), color }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// An immutable, ordered list of named colors.
///
/// Cloning a `Palette` shares the same entries, so a query can hold its own
/// snapshot while a reload builds a replacement.
#[derive(Clone, PartialEq, Debug)]
pub struct Palette {
    entries: Arc<[PaletteEntry]>,
}

impl Palette {
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Palette { entries: entries.into() }
    }

    pub fn empty() -> Self {
        Palette::new(Vec::new())
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rank(&self, target: Color, limit: usize) -> Vec<RankedResult> {
        rank(self, target, limit)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::empty()
    }
}

impl FromIterator<PaletteEntry> for Palette {
    fn from_iter<I: IntoIterator<Item = PaletteEntry>>(iter: I) -> Self {
        Palette::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct RankedResult {
    pub entry: PaletteEntry,
    pub distance: f64,
}

/// Ranks every palette entry by its distance to `target` and keeps the
/// closest `limit`. Entries at equal distance stay in palette order.
pub fn rank(palette: &Palette, target: Color, limit: usize) -> Vec<RankedResult> {
    let mut scored: Vec<(usize, f64)> = palette.iter()
        .enumerate()
        .map(|(index, entry)| (index, distance(target, entry.color)))
        .collect();

    // sort_by is stable, which keeps ties in palette order
    scored.sort_by(|(_, a), (_, b)| a.total_cmp(b));

    let ranked: Vec<RankedResult> = scored.into_iter()
        .take(limit)
        .map(|(index, distance)| RankedResult {
            entry: palette.entries[index].clone(),
            distance,
        })
        .collect();

    debug!("ranked {} of {} palette entries against {}", ranked.len(), palette.len(), target);
    ranked
}
