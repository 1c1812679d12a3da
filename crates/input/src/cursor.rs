/// Position of the currently selected cell.
///
/// Owned by the input layer; the grid itself never sees it. Movement wraps
/// modulo the grid dimensions, each axis independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellCursor {
    x: usize,
    y: usize,
}

impl CellCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn pos(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Move by (dx, dy) with wraparound on both axes.
    ///
    /// A stale position outside the given dimensions is pulled back in range
    /// by the same modulo.
    pub fn move_by(&mut self, dx: i32, dy: i32, width: usize, height: usize) {
        if width == 0 || height == 0 {
            return;
        }
        self.x = (self.x as i32 + dx).rem_euclid(width as i32) as usize;
        self.y = (self.y as i32 + dy).rem_euclid(height as i32) as usize;
    }

    /// Raster advance after an assignment: one step right with wraparound,
    /// and when that wrapped back to column 0, one step down as well.
    ///
    /// Filling cell after cell therefore walks the grid left-to-right,
    /// top-to-bottom, and wraps from the last cell to the first.
    pub fn advance(&mut self, width: usize, height: usize) {
        self.move_by(1, 0, width, height);
        if self.x == 0 {
            self.move_by(0, 1, width, height);
        }
    }

    /// Back to the origin. Used when a new grid is installed.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
