//! Keyboard-driven cell tagging state machine.
//!
//! Maps raw key events to grid mutations: movement keys steer the cursor,
//! space clears the cell under it, and alphanumeric characters accumulate in
//! a pending buffer that is resolved against the legend's short keys. A
//! buffer matching several keys waits for more input; when the host's
//! one-shot timer fires first, the buffer is abandoned.
//!
//! The resolver never blocks and owns no timer of its own: `handle_key`
//! returns a [`TimerAction`] telling the host event loop what to do with its
//! single one-shot, and the host calls [`ShortcutResolver::timeout_elapsed`]
//! when it fires. At most one timer is armed at any time.

use std::time::Duration;

use gridmark_engine::error::GridError;
use gridmark_engine::grid::Grid;
use gridmark_engine::legend::EMPTY_KEY;

use crate::cursor::CellCursor;
use crate::events::{EventCallback, ResolverEvent};
use crate::keys::{self, Direction, Key};

/// How long an ambiguous prefix may sit in the buffer before it is
/// abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// What the host event loop should do with its one-shot ambiguity timer
/// after a call into the resolver.
///
/// `Arm` replaces any pending one-shot; `Cancel` clears it. The host holds
/// at most one.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Leave the timer as it is.
    None,
    /// (Re)start the one-shot to fire after this long.
    Arm(Duration),
    /// Stop any pending one-shot.
    Cancel,
}

/// The cursor plus the pending-shortcut state machine.
///
/// Borrows the [`Grid`] per call rather than owning it, so the shell stays
/// free to hand the grid to the renderer and the io layer between key
/// events. Single-threaded by design; see the module docs for the timer
/// contract.
pub struct ShortcutResolver {
    cursor: CellCursor,
    pending: String,
    timeout: Duration,
    callback: Option<EventCallback>,
}

impl ShortcutResolver {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// A resolver with a non-default ambiguity timeout (wired from settings
    /// by the shell).
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cursor: CellCursor::new(),
            pending: String::new(),
            timeout,
            callback: None,
        }
    }

    /// Register the observer for status/assignment/cursor events.
    pub fn set_event_callback(&mut self, callback: EventCallback) {
        self.callback = Some(callback);
    }

    /// The currently selected cell.
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor.pos()
    }

    /// The shortcut characters typed so far; empty when idle.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Forget everything: cursor to the origin, buffer discarded. Call when
    /// installing a new grid.
    pub fn reset(&mut self) -> TimerAction {
        self.cursor.reset();
        self.emit_cursor();
        self.clear_pending();
        TimerAction::Cancel
    }

    /// Feed one key event through the state machine.
    ///
    /// Movement is decoded first (so the `h/l/k/j` alternates never reach
    /// the buffer), then the space clear key, then eligible shortcut
    /// characters. Everything else is ignored. The only error is an
    /// out-of-bounds cell write, which can happen when the grid was resized
    /// under a live cursor; it propagates for the shell to report.
    pub fn handle_key(&mut self, grid: &mut Grid, key: Key) -> Result<TimerAction, GridError> {
        if let Some(direction) = Direction::from_key(key) {
            let (dx, dy) = direction.delta();
            self.cursor.move_by(dx, dy, grid.width(), grid.height());
            self.emit_cursor();
            return Ok(TimerAction::None);
        }

        match key {
            // Clear bypasses the buffer entirely: whatever was pending stays
            // pending, and any armed timer keeps running.
            Key::Char(' ') => {
                self.assign(grid, EMPTY_KEY.to_string())?;
                Ok(TimerAction::None)
            }
            Key::Char(c) if keys::is_shortcut_char(c) => self.push_shortcut(grid, c),
            _ => Ok(TimerAction::None),
        }
    }

    /// The host's one-shot fired: give up on the ambiguous prefix.
    pub fn timeout_elapsed(&mut self) {
        self.clear_pending();
    }

    fn push_shortcut(&mut self, grid: &mut Grid, c: char) -> Result<TimerAction, GridError> {
        self.pending.push(c.to_ascii_lowercase());
        let buffer = self.pending.clone();
        self.emit(ResolverEvent::StatusChanged(buffer));

        let matched: Vec<String> = grid
            .match_key(&self.pending)
            .into_iter()
            .map(String::from)
            .collect();

        match matched.as_slice() {
            [key] => {
                let key = key.clone();
                self.assign(grid, key)?;
                self.clear_pending();
                Ok(TimerAction::Cancel)
            }
            [] => {
                // Dead end; drop the sequence on the spot.
                self.clear_pending();
                Ok(TimerAction::Cancel)
            }
            _ => Ok(TimerAction::Arm(self.timeout)),
        }
    }

    /// Write `key` to the cell under the cursor and advance in raster order.
    fn assign(&mut self, grid: &mut Grid, key: String) -> Result<(), GridError> {
        let (x, y) = self.cursor.pos();
        grid.set_data(x, y, &key)?;
        self.emit(ResolverEvent::CellAssigned { x, y, key });
        self.cursor.advance(grid.width(), grid.height());
        self.emit_cursor();
        Ok(())
    }

    fn clear_pending(&mut self) {
        self.pending.clear();
        self.emit(ResolverEvent::StatusChanged(String::new()));
    }

    fn emit(&mut self, event: ResolverEvent) {
        if let Some(callback) = self.callback.as_mut() {
            callback(event);
        }
    }

    fn emit_cursor(&mut self) {
        let (x, y) = self.cursor.pos();
        self.emit(ResolverEvent::CursorMoved { x, y });
    }
}

impl Default for ShortcutResolver {
    fn default() -> Self {
        Self::new()
    }
}
