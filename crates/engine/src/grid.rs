use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::legend::{Legend, EMPTY_KEY};

/// The tagging grid: dimensions, legend, and one short key per cell.
///
/// Cells hold the empty string until assigned. The grid has no notion of a
/// current cell; the cursor lives in the input layer and the renderer is an
/// external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: (usize, usize),
    legend: Legend,
    /// Indexed [row][col].
    cells: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(width: usize, height: usize, legend: Legend) -> Self {
        Self {
            size: (width, height),
            legend,
            cells: vec![vec![String::new(); width]; height],
        }
    }

    /// The 16x8 starter grid over the stock legend.
    pub fn starter() -> Self {
        Grid::new(16, 8, Legend::starter())
    }

    /// Current dimensions as (width, height), returned by value.
    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.0
    }

    pub fn height(&self) -> usize {
        self.size.1
    }

    /// Overwrite the declared dimensions.
    ///
    /// The cell array is NOT reshaped. A caller that changes the size must
    /// install a matching cell array itself; the file restore path and the
    /// bootstrap always construct the two together.
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.size = (width, height);
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Ordered legend short keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.legend.keys()
    }

    /// Display name for a legend short key.
    pub fn name(&self, key: &str) -> Result<&str, GridError> {
        self.legend.name(key)
    }

    /// Legend keys starting with `prefix`, in legend order.
    pub fn match_key(&self, prefix: &str) -> Vec<&str> {
        self.legend.matching(prefix)
    }

    /// Insert or overwrite a legend entry; new keys append to the order.
    pub fn set_legend_value(&mut self, key: &str, name: &str) {
        self.legend.set(key, name);
    }

    /// The raw cell rows, indexed [row][col].
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Value at (x, y); the empty string means unassigned.
    pub fn data(&self, x: usize, y: usize) -> Result<&str, GridError> {
        self.check_bounds(x, y)?;
        Ok(self.cells[y][x].as_str())
    }

    /// Write a value at (x, y).
    pub fn set_data(&mut self, x: usize, y: usize, value: &str) -> Result<(), GridError> {
        self.check_bounds(x, y)?;
        self.cells[y][x] = value.to_string();
        Ok(())
    }

    /// Occurrence count per cell key across the whole cell array.
    ///
    /// Unassigned cells count under the reserved space key. Keys present in
    /// cells but missing from the legend are tallied here too; the export
    /// layer surfaces legend columns only.
    pub fn histogram(&self) -> HashMap<&str, usize> {
        let mut hist: HashMap<&str, usize> = HashMap::new();
        for cell in self.cells.iter().flatten() {
            let key = if cell.is_empty() { EMPTY_KEY } else { cell };
            *hist.entry(key).or_insert(0) += 1;
        }
        hist
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), GridError> {
        let (width, height) = self.size;
        let in_declared = x < width && y < height;
        // Also guard the actual array: set_size leaves it alone, so the two
        // can disagree.
        let in_array = y < self.cells.len() && x < self.cells[y].len();
        if in_declared && in_array {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                width,
                height,
            })
        }
    }
}
