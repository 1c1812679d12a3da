// Native .grid format using SQLite

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags};

use gridmark_engine::grid::Grid;
use gridmark_engine::legend::Legend;

use crate::error::StoreError;
use crate::NATIVE_FORMAT_VERSION;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS legend (
    position INTEGER PRIMARY KEY,
    key TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS cells (
    row INTEGER NOT NULL,
    col INTEGER NOT NULL,
    key TEXT NOT NULL,
    PRIMARY KEY (row, col)
);
"#;

/// Append `extension` when the path doesn't already carry it.
///
/// Save/open dialogs hand over whatever the user typed; grid files get
/// `.grid`, exports get `.csv`.
pub fn ensure_extension(path: &Path, extension: &str) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == extension => path.to_path_buf(),
        _ => {
            let mut name = path.as_os_str().to_owned();
            name.push(".");
            name.push(extension);
            PathBuf::from(name)
        }
    }
}

/// Serialize `(size, legend, cells)` to `path`, overwriting any existing
/// file.
pub fn save(grid: &Grid, path: &Path) -> Result<(), StoreError> {
    // SQLite appends to an existing database, so start from a clean file
    if path.exists() {
        std::fs::remove_file(path)?;
    }

    let conn = Connection::open(path).map_err(sqlite_error)?;
    conn.execute_batch(SCHEMA).map_err(sqlite_error)?;

    let (width, height) = grid.size();
    let meta = [
        ("format_version", NATIVE_FORMAT_VERSION.to_string()),
        ("width", width.to_string()),
        ("height", height.to_string()),
    ];
    for (key, value) in meta {
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .map_err(sqlite_error)?;
    }

    conn.execute("BEGIN TRANSACTION", []).map_err(sqlite_error)?;

    {
        let mut stmt = conn
            .prepare("INSERT INTO legend (position, key, name) VALUES (?1, ?2, ?3)")
            .map_err(sqlite_error)?;
        for (position, entry) in grid.legend().entries().enumerate() {
            stmt.execute(params![position as i64, entry.key, entry.name])
                .map_err(sqlite_error)?;
        }
    }

    {
        let mut stmt = conn
            .prepare("INSERT INTO cells (row, col, key) VALUES (?1, ?2, ?3)")
            .map_err(sqlite_error)?;
        for (row, cells) in grid.cells().iter().enumerate() {
            for (col, key) in cells.iter().enumerate() {
                // Unassigned cells are implicit
                if key.is_empty() {
                    continue;
                }
                stmt.execute(params![row as i64, col as i64, key])
                    .map_err(sqlite_error)?;
            }
        }
    }

    conn.execute("COMMIT", []).map_err(sqlite_error)?;
    Ok(())
}

/// Build a fresh grid from a saved file.
pub fn load(path: &Path) -> Result<Grid, StoreError> {
    // Open read-only so a missing file surfaces as an i/o error instead of
    // SQLite creating an empty database at the path.
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(sqlite_error)?;

    let version = read_meta(&conn, "format_version")?
        .parse::<u32>()
        .map_err(|_| StoreError::Corrupt("unparsable format_version".to_string()))?;
    if version > NATIVE_FORMAT_VERSION {
        return Err(StoreError::Corrupt(format!(
            "grid file format v{version} is newer than supported v{NATIVE_FORMAT_VERSION}"
        )));
    }

    let width = read_dimension(&conn, "width")?;
    let height = read_dimension(&conn, "height")?;

    let mut legend = Legend::new();
    {
        let mut stmt = conn
            .prepare("SELECT key, name FROM legend ORDER BY position")
            .map_err(sqlite_error)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(sqlite_error)?;
        for row in rows {
            let (key, name) = row.map_err(sqlite_error)?;
            legend.set(&key, &name);
        }
    }

    let mut grid = Grid::new(width, height, legend);
    {
        let mut stmt = conn
            .prepare("SELECT row, col, key FROM cells")
            .map_err(sqlite_error)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(sqlite_error)?;
        for row in rows {
            let (r, c, key) = row.map_err(sqlite_error)?;
            let (r, c) = (to_coord(r)?, to_coord(c)?);
            grid.set_data(c, r, &key).map_err(|_| {
                StoreError::Corrupt(format!("cell ({c}, {r}) outside {width}x{height} grid"))
            })?;
        }
    }

    Ok(grid)
}

/// Replace `grid`'s size, legend, and cells with the file's contents.
pub fn restore(grid: &mut Grid, path: &Path) -> Result<(), StoreError> {
    *grid = load(path)?;
    Ok(())
}

fn read_meta(conn: &Connection, key: &str) -> Result<String, StoreError> {
    conn.query_row("SELECT value FROM meta WHERE key = ?1", params![key], |row| {
        row.get(0)
    })
    .map_err(|err| match err {
        rusqlite::Error::QueryReturnedNoRows => {
            StoreError::Corrupt(format!("missing meta entry {key:?}"))
        }
        other => sqlite_error(other),
    })
}

fn read_dimension(conn: &Connection, key: &str) -> Result<usize, StoreError> {
    let value = read_meta(conn, key)?;
    match value.parse::<usize>() {
        Ok(dim) if dim > 0 => Ok(dim),
        _ => Err(StoreError::Corrupt(format!(
            "meta {key:?} is not a grid dimension: {value:?}"
        ))),
    }
}

fn to_coord(value: i64) -> Result<usize, StoreError> {
    usize::try_from(value)
        .map_err(|_| StoreError::Corrupt(format!("negative cell coordinate {value}")))
}

/// Failures opening or touching the file are environment problems; anything
/// the database itself rejects means the file is not a grid.
fn sqlite_error(err: rusqlite::Error) -> StoreError {
    use rusqlite::ErrorCode::{
        CannotOpen, DiskFull, PermissionDenied, ReadOnly, SystemIoFailure,
    };
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if matches!(
                e.code,
                CannotOpen | PermissionDenied | ReadOnly | DiskFull | SystemIoFailure
            ) =>
        {
            StoreError::Io(std::io::Error::other(err.to_string()))
        }
        _ => StoreError::Corrupt(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn tagged_grid() -> Grid {
        let mut grid = Grid::starter();
        grid.set_data(0, 0, "one").unwrap();
        grid.set_data(15, 7, "five").unwrap();
        grid.set_data(3, 2, " ").unwrap();
        grid.set_legend_value("six", "Six birds");
        grid
    }

    #[test]
    fn test_roundtrip_is_exact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("birds.grid");

        let grid = tagged_grid();
        save(&grid, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_restore_replaces_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("birds.grid");
        save(&tagged_grid(), &path).unwrap();

        let mut grid = Grid::new(2, 2, Legend::new());
        restore(&mut grid, &path).unwrap();

        assert_eq!(grid.size(), (16, 8));
        assert_eq!(grid.data(0, 0).unwrap(), "one");
        assert_eq!(grid.name("six").unwrap(), "Six birds");
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("birds.grid");

        save(&tagged_grid(), &path).unwrap();
        let mut smaller = Grid::new(2, 1, Legend::starter());
        smaller.set_data(1, 0, "two").unwrap();
        save(&smaller, &path).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, smaller);
    }

    #[test]
    fn test_legend_order_survives_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("order.grid");

        let grid = tagged_grid();
        save(&grid, &path).unwrap();
        let loaded = load(&path).unwrap();

        let keys: Vec<&str> = loaded.keys().collect();
        assert_eq!(keys, vec![" ", "one", "two", "three", "four", "five", "six"]);
    }

    #[test]
    fn test_load_missing_file_is_io() {
        let dir = tempdir().unwrap();
        let err = load(&dir.path().join("nope.grid")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)), "got {err:?}");
    }

    #[test]
    fn test_load_non_database_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("junk.grid");
        fs::write(&path, "definitely not a grid file").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)), "got {err:?}");
    }

    #[test]
    fn test_load_empty_database_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.grid");
        Connection::open(&path).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)), "got {err:?}");
    }

    #[test]
    fn test_load_out_of_range_cell_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("oob.grid");
        save(&Grid::new(2, 2, Legend::starter()), &path).unwrap();

        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "INSERT INTO cells (row, col, key) VALUES (5, 0, 'one')",
            [],
        )
        .unwrap();
        drop(conn);

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)), "got {err:?}");
    }

    #[test]
    fn test_newer_format_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.grid");
        save(&Grid::starter(), &path).unwrap();

        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "UPDATE meta SET value = '999' WHERE key = 'format_version'",
            [],
        )
        .unwrap();
        drop(conn);

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)), "got {err:?}");
    }

    #[test]
    fn test_ensure_extension() {
        assert_eq!(
            ensure_extension(Path::new("/tmp/birds"), "grid"),
            PathBuf::from("/tmp/birds.grid")
        );
        assert_eq!(
            ensure_extension(Path::new("/tmp/birds.grid"), "grid"),
            PathBuf::from("/tmp/birds.grid")
        );
        assert_eq!(
            ensure_extension(Path::new("/tmp/birds.v2"), "csv"),
            PathBuf::from("/tmp/birds.v2.csv")
        );
    }
}
