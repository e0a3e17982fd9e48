//! Finds the named palette colors closest to a hex or `rgb()` color.
//!
//! ```
//! use colour_search::{Color, Palette, PaletteEntry, QueryService};
//!
//! let palette = Palette::new(vec![
//!     PaletteEntry::new("red", Color::new(255, 0, 0)),
//!     PaletteEntry::new("crimson", Color::new(220, 20, 60)),
//! ]);
//! let rows = QueryService::default().search("rgb(250, 5, 5)", &palette).unwrap();
//! assert_eq!(rows[0].name, "red");
//! ```

pub mod colors;
pub mod loader;
pub mod palette_index;
pub mod percent;
pub mod query;
pub mod render;
pub mod session;

pub use colors::{Color, ColorParseError, Hsl, Notation};
pub use loader::{JsonFileLoader, PaletteLoader, SourceUnavailable};
pub use palette_index::{Palette, PaletteEntry, RankedResult, DEFAULT_LIMIT};
pub use percent::Percent;
pub use query::{DisplayRow, Query, QueryService, SearchError};
pub use session::{Outcome, Session, SessionState};
