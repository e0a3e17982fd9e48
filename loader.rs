//! Palette sources.
//!
//! A palette document is JSON shaped like
//! `{ "colors": [ { "color": "red", "hex": "#ff0000" }, ... ] }`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::colors::parse_hex;
use crate::palette_index::{Palette, PaletteEntry};

/// The palette could not be loaded. Callers keep an empty palette until a
/// retry succeeds.
#[derive(Debug, Error)]
pub enum SourceUnavailable {
    #[error("unable to read palette from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("palette source is not a color document")]
    Malformed(#[from] serde_json::Error),
}

/// Supplies a freshly built palette on every call. Retrying a failed load is
/// simply calling `load` again.
pub trait PaletteLoader {
    fn load(&self) -> Result<Palette, SourceUnavailable>;
}

impl<F> PaletteLoader for F
    where F: Fn() -> Result<Palette, SourceUnavailable>
{
    fn load(&self) -> Result<Palette, SourceUnavailable> {
        self()
    }
}

#[derive(Clone, Debug)]
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileLoader { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PaletteLoader for JsonFileLoader {
    fn load(&self) -> Result<Palette, SourceUnavailable> {
        let json = fs::read_to_string(&self.path).map_err(|source| SourceUnavailable::Read {
            path: self.path.clone(),
            source,
        })?;
        let palette = palette_from_json(&json)?;
        info!("loaded {} colors from {}", palette.len(), self.path.display());
        Ok(palette)
    }
}

#[derive(Deserialize)]
struct PaletteDocument {
    colors: Vec<PaletteRecord>,
}

#[derive(Deserialize)]
struct PaletteRecord {
    color: String,
    hex: String,
}

/// Builds a palette from a JSON document, keeping the document's order and
/// any duplicate entries. Entries whose hex fails to parse are skipped.
pub fn palette_from_json(json: &str) -> Result<Palette, SourceUnavailable> {
    let document: PaletteDocument = serde_json::from_str(json)?;

    Ok(document.colors.into_iter()
        .filter_map(|record| match parse_hex(&record.hex) {
            Ok(color) => Some(PaletteEntry::new(record.color, color)),
            Err(err) => {
                warn!("skipping palette color {:?} with hex {:?}: {}", record.color, record.hex, err);
                None
            }
        })
        .collect())
}
