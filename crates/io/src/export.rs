// CSV histogram export

use std::fs;
use std::path::Path;

use gridmark_engine::grid::Grid;

use crate::error::StoreError;

/// Write the tagging histogram for `grid` to `path`, overwriting any
/// existing file.
///
/// The format is fixed, two CRLF-terminated rows with ", " separators and
/// quotes on the header fields only:
///
/// ```text
/// "Width", "Height", "<name1>", ..., "<nameN>"
/// <w>, <h>, <count1>, ..., <countN>
/// ```
///
/// Columns follow legend order. Unassigned cells count under the reserved
/// space key. Cell keys missing from the legend are counted but get no
/// column; they silently disappear from the output.
pub fn export(grid: &Grid, path: &Path) -> Result<(), StoreError> {
    let hist = grid.histogram();
    let (width, height) = grid.size();

    let mut out = String::new();

    out.push_str("\"Width\", \"Height\"");
    for entry in grid.legend().entries() {
        out.push_str(&format!(", \"{}\"", entry.name));
    }
    out.push_str("\r\n");

    out.push_str(&format!("{}, {}", width, height));
    for entry in grid.legend().entries() {
        let count = hist.get(entry.key.as_str()).copied().unwrap_or(0);
        out.push_str(&format!(", {}", count));
    }
    out.push_str("\r\n");

    fs::write(path, out)?;
    Ok(())
}
