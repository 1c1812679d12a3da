/// A discrete key event delivered by the shell.
///
/// The shell translates its toolkit's key codes into this; the core never
/// sees toolkit types. Modified keys, function keys and the like should be
/// delivered as `Other` (or simply not delivered) — they are ignored either
/// way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Arrow keys: the primary movement bindings.
    Left,
    Right,
    Up,
    Down,
    /// A printable character with no modifier. Space clears the current
    /// cell, `h/l/k/j` move, alphanumerics feed the shortcut buffer.
    Char(char),
    /// Anything else; never changes state.
    Other,
}

/// True for the 62 characters eligible to enter the pending shortcut buffer:
/// ASCII digits and letters of either case.
pub fn is_shortcut_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// A single-cell movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Decode a key into a movement, if it is one.
    ///
    /// The `h/l/k/j` alternates match in either case, like the letter
    /// keycodes they stand in for. Movement is decoded before shortcut
    /// eligibility, so these four letters never reach the pending buffer.
    pub fn from_key(key: Key) -> Option<Direction> {
        match key {
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Char(c) => match c.to_ascii_lowercase() {
                'h' => Some(Direction::Left),
                'l' => Some(Direction::Right),
                'k' => Some(Direction::Up),
                'j' => Some(Direction::Down),
                _ => None,
            },
            Key::Other => None,
        }
    }

    /// (dx, dy) for one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }
}
