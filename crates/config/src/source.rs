//! Default-grid bootstrap.
//!
//! The default grid used to be an implicit well-known path baked into grid
//! construction; here it is an explicit value the shell builds once (from
//! settings or a platform default) and passes to whoever needs the initial
//! grid.

use std::path::{Path, PathBuf};

use gridmark_engine::grid::Grid;
use gridmark_io::error::StoreError;
use gridmark_io::native;

use crate::settings::Settings;

/// Where the default grid is read from and persisted to.
#[derive(Debug, Clone)]
pub struct GridSource {
    path: PathBuf,
}

impl GridSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform-default location: `<data dir>/gridmark/default.grid`.
    pub fn default_location() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridmark");
        Self {
            path: dir.join("default.grid"),
        }
    }

    /// The location the settings file points at, or the platform default
    /// when unset.
    pub fn from_settings(settings: &Settings) -> Self {
        if settings.default_grid_path.is_empty() {
            Self::default_location()
        } else {
            Self::new(&settings.default_grid_path)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the default grid; when the file is missing or unreadable as a
    /// grid, fall back to the starter grid and persist it at the source
    /// path, so the fallback only ever happens once per environment.
    ///
    /// The fallback covers exactly the restore failures (`Io`/`Corrupt`).
    /// A failure persisting the starter grid is NOT swallowed; it
    /// propagates to the caller.
    pub fn load_or_init(&self) -> Result<Grid, StoreError> {
        match native::load(&self.path) {
            Ok(grid) => Ok(grid),
            Err(err) => {
                eprintln!(
                    "No usable default grid at {} ({}); writing starter grid",
                    self.path.display(),
                    err
                );
                let grid = Grid::starter();
                if let Some(parent) = self.path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                native::save(&grid, &self.path)?;
                Ok(grid)
            }
        }
    }
}
