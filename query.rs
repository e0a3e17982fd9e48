use log::debug;
use thiserror::Error;

use crate::colors::{parse, Color, ColorParseError, Hsl};
use crate::loader::{PaletteLoader, SourceUnavailable};
use crate::palette_index::{rank, Palette, PaletteEntry, RankedResult, DEFAULT_LIMIT};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("The colour is invalid.")]
    InvalidFormat(#[source] ColorParseError),
}

/// Raw search text together with the color it canonicalizes to.
#[derive(Clone, PartialEq, Debug)]
pub struct Query {
    raw: String,
    color: Color,
}

impl Query {
    /// Surrounding whitespace is ignored; everything else must match a
    /// notation exactly.
    pub fn parse(raw: &str) -> Result<Self, SearchError> {
        let text = raw.trim();
        let color = parse(text).map_err(SearchError::InvalidFormat)?;

        Ok(Query { raw: raw.to_string(), color })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// One result row, with every representation the display needs.
#[derive(Clone, PartialEq, Debug)]
pub struct DisplayRow {
    pub name: String,
    pub color: Color,
    pub hex: String,
    pub rgb: (u8, u8, u8),
    pub hsl: Hsl,
    /// `None` for rows listed straight from the palette, before any search.
    pub distance: Option<f64>,
}

impl DisplayRow {
    pub fn from_entry(entry: &PaletteEntry, distance: Option<f64>) -> Self {
        let color = entry.color();
        DisplayRow {
            name: entry.name().to_string(),
            color,
            hex: color.to_hex(),
            rgb: color.to_rgb(),
            hsl: color.to_hsl(),
            distance,
        }
    }

    /// `r, g, b` as shown in the RGB column.
    pub fn rgb_text(&self) -> String {
        let (r, g, b) = self.rgb;
        format!("{r}, {g}, {b}")
    }
}

impl From<RankedResult> for DisplayRow {
    fn from(result: RankedResult) -> Self {
        DisplayRow::from_entry(&result.entry, Some(result.distance))
    }
}

/// Turns search text into display rows ranked against a palette.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct QueryService {
    limit: usize,
}

impl QueryService {
    pub fn new(limit: usize) -> Self {
        QueryService { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn search(&self, raw: &str, palette: &Palette) -> Result<Vec<DisplayRow>, SearchError> {
        let query = Query::parse(raw)?;
        debug!("searching for {:?} as {}", query.raw(), query.color());

        Ok(rank(palette, query.color(), self.limit)
            .into_iter()
            .map(DisplayRow::from)
            .collect())
    }

    pub fn load_palette(&self, loader: &impl PaletteLoader) -> Result<Palette, SourceUnavailable> {
        loader.load()
    }

    /// The palette in its own order, capped at the limit, as shown before
    /// any search is made.
    pub fn listing(&self, palette: &Palette) -> Vec<DisplayRow> {
        palette.iter()
            .take(self.limit)
            .map(|entry| DisplayRow::from_entry(entry, None))
            .collect()
    }
}

impl Default for QueryService {
    fn default() -> Self {
        QueryService::new(DEFAULT_LIMIT)
    }
}
