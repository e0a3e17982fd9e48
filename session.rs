//! Load and search state for one user session.
//!
//! `Loading -> Ready`, or `Loading -> Failed -> (reload) -> Loading`. Searches
//! run synchronously inside `Ready` or `Failed`; a failed load leaves an empty
//! palette behind, so searching then yields no rows rather than an error.

use log::{info, warn};

use crate::loader::{PaletteLoader, SourceUnavailable};
use crate::palette_index::Palette;
use crate::query::{DisplayRow, QueryService, SearchError};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionState {
    Loading,
    Ready,
    Failed,
}

/// What the display should show for the current state.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Outcome<'a> {
    Loading,
    Rows(&'a [DisplayRow]),
    NoMatches,
    Unavailable,
}

pub struct Session<L> {
    loader: L,
    service: QueryService,
    state: SessionState,
    palette: Palette,
    search_text: String,
    rows: Vec<DisplayRow>,
}

impl<L: PaletteLoader> Session<L> {
    pub fn new(loader: L, service: QueryService) -> Self {
        Session {
            loader,
            service,
            state: SessionState::Loading,
            palette: Palette::empty(),
            search_text: String::new(),
            rows: Vec::new(),
        }
    }

    /// Loads the palette, replacing the previous one in a single assignment.
    /// Also used to retry after a failure.
    pub fn load(&mut self) -> Result<usize, SourceUnavailable> {
        self.state = SessionState::Loading;

        match self.service.load_palette(&self.loader) {
            Ok(palette) => {
                info!("palette ready with {} colors", palette.len());
                self.rows = self.service.listing(&palette);
                self.palette = palette;
                self.state = SessionState::Ready;
                Ok(self.palette.len())
            }
            Err(err) => {
                warn!("palette load failed: {err}");
                self.palette = Palette::empty();
                self.rows.clear();
                self.state = SessionState::Failed;
                Err(err)
            }
        }
    }

    /// Searches the current palette. On failure the previous rows are kept.
    pub fn search(&mut self, raw: &str) -> Result<&[DisplayRow], SearchError> {
        self.search_text = raw.to_string();
        self.rows = self.service.search(raw, &self.palette)?;
        Ok(&self.rows)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// A snapshot of the current palette. It stays valid across reloads.
    pub fn palette(&self) -> Palette {
        self.palette.clone()
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn outcome(&self) -> Outcome<'_> {
        if self.state == SessionState::Loading {
            Outcome::Loading
        } else if !self.rows.is_empty() {
            Outcome::Rows(&self.rows)
        } else if !self.search_text.is_empty() {
            Outcome::NoMatches
        } else {
            Outcome::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io;
    use std::path::PathBuf;

    use super::*;
    use crate::colors::Color;
    use crate::palette_index::PaletteEntry;

    fn offline() -> SourceUnavailable {
        SourceUnavailable::Read {
            path: PathBuf::from("colors.json"),
            source: io::Error::from(io::ErrorKind::NotFound),
        }
    }

    fn primaries() -> Palette {
        Palette::new(vec![
            PaletteEntry::new("red", Color::new(255, 0, 0)),
            PaletteEntry::new("green", Color::new(0, 255, 0)),
            PaletteEntry::new("blue", Color::new(0, 0, 255)),
        ])
    }

    fn ready_session() -> Session<impl PaletteLoader> {
        let mut session = Session::new(|| -> Result<Palette, SourceUnavailable> { Ok(primaries()) }, QueryService::default());
        session.load().unwrap();
        session
    }

    #[test]
    fn test_new_session_is_loading() {
        let session = Session::new(|| -> Result<Palette, SourceUnavailable> { Ok(primaries()) }, QueryService::default());
        assert_eq!(session.state(), SessionState::Loading);
        assert_eq!(session.outcome(), Outcome::Loading);
    }

    #[test]
    fn test_load_lists_palette() {
        let session = ready_session();
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.rows().len(), 3);
        assert_eq!(session.rows()[0].name, "red");
        assert_eq!(session.rows()[0].distance, None);
    }

    #[test]
    fn test_search_ranks_rows() {
        let mut session = ready_session();
        let rows = session.search("#0000fe").unwrap();
        assert_eq!(rows[0].name, "blue");
        assert_eq!(session.state(), SessionState::Ready);
        assert!(matches!(session.outcome(), Outcome::Rows(rows) if rows.len() == 3));
    }

    #[test]
    fn test_invalid_search_keeps_previous_rows() {
        let mut session = ready_session();
        session.search("rgb(0, 250, 0)").unwrap();
        let before = session.rows().to_vec();

        let err = session.search("notacolor").unwrap_err();
        assert_eq!(err.to_string(), "The colour is invalid.");
        assert_eq!(session.rows(), &before[..]);
        assert_eq!(session.search_text(), "notacolor");
    }

    #[test]
    fn test_failed_load_then_retry() {
        let attempts = Cell::new(0);
        let loader = move || {
            attempts.set(attempts.get() + 1);
            if attempts.get() == 1 { Err(offline()) } else { Ok(primaries()) }
        };
        let mut session = Session::new(loader, QueryService::default());

        assert!(session.load().is_err());
        assert_eq!(session.state(), SessionState::Failed);
        assert!(session.palette().is_empty());
        assert_eq!(session.outcome(), Outcome::Unavailable);

        assert_eq!(session.load().unwrap(), 3);
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.palette().len(), 3);
    }

    #[test]
    fn test_search_after_failed_load_has_no_matches() {
        let mut session = Session::new(|| -> Result<Palette, SourceUnavailable> { Err(offline()) }, QueryService::default());
        assert!(session.load().is_err());

        assert!(session.search("#ffffff").unwrap().is_empty());
        assert_eq!(session.outcome(), Outcome::NoMatches);
    }

    #[test]
    fn test_reload_publishes_new_snapshot() {
        let attempts = Cell::new(0);
        let loader = move || -> Result<Palette, SourceUnavailable> {
            attempts.set(attempts.get() + 1);
            if attempts.get() == 1 {
                Ok(primaries())
            } else {
                Ok(Palette::new(vec![PaletteEntry::new("black", Color::new(0, 0, 0))]))
            }
        };
        let mut session = Session::new(loader, QueryService::default());
        session.load().unwrap();
        let snapshot = session.palette();

        session.load().unwrap();

        assert_eq!(snapshot, primaries());
        assert_eq!(session.palette().entries()[0].name(), "black");
        assert_eq!(session.search("#000").unwrap()[0].name, "black");
    }
}
