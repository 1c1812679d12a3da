use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tempfile::tempdir;

use gridmark_engine::grid::Grid;
use gridmark_engine::legend::Legend;
use gridmark_input::events::ResolverEvent;
use gridmark_input::keys::Key;
use gridmark_input::resolver::{ShortcutResolver, TimerAction};
use gridmark_io::{export, native};

/// A shell stand-in: resolver + grid + the one-shot timer slot + status bar.
struct Session {
    grid: Grid,
    resolver: ShortcutResolver,
    armed: Option<Duration>,
    status: Rc<RefCell<String>>,
}

impl Session {
    fn new(grid: Grid) -> Self {
        let status = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&status);

        let mut resolver = ShortcutResolver::new();
        resolver.set_event_callback(Box::new(move |event| {
            if let ResolverEvent::StatusChanged(text) = event {
                *sink.borrow_mut() = text;
            }
        }));

        Self {
            grid,
            resolver,
            armed: None,
            status,
        }
    }

    fn press(&mut self, key: Key) {
        match self.resolver.handle_key(&mut self.grid, key).unwrap() {
            TimerAction::None => {}
            TimerAction::Arm(duration) => self.armed = Some(duration),
            TimerAction::Cancel => self.armed = None,
        }
    }

    fn type_chars(&mut self, chars: &str) {
        for c in chars.chars() {
            self.press(Key::Char(c));
        }
    }

    fn timeout(&mut self) {
        assert!(self.armed.take().is_some(), "timeout with no armed timer");
        self.resolver.timeout_elapsed();
    }

    fn cell(&self, x: usize, y: usize) -> &str {
        self.grid.data(x, y).unwrap()
    }
}

// -------------------------------------------------------------------------
// Full session: tag, clear, abandon, navigate
// -------------------------------------------------------------------------

#[test]
fn raster_tagging_session() {
    let mut s = Session::new(Grid::new(4, 2, Legend::starter()));

    // Unique prefix resolves on the first character and advances.
    s.type_chars("o");
    assert_eq!(s.cell(0, 0), "one");
    assert_eq!(s.resolver.cursor(), (1, 0));

    // Ambiguous prefix holds until the second character.
    s.type_chars("t");
    assert_eq!(s.cell(1, 0), "");
    assert!(s.armed.is_some());
    assert_eq!(*s.status.borrow(), "t");
    s.type_chars("w");
    assert_eq!(s.cell(1, 0), "two");
    assert_eq!(*s.status.borrow(), "");

    // Give up on a sequence: the timer fires, nothing is written.
    s.type_chars("f");
    s.timeout();
    assert_eq!(s.cell(2, 0), "");
    assert_eq!(s.resolver.cursor(), (2, 0));

    // Start over; "fo" is four.
    s.type_chars("fo");
    assert_eq!(s.cell(2, 0), "four");

    // Clear key writes the reserved space key and advances off the row end.
    s.press(Key::Char(' '));
    assert_eq!(s.cell(3, 0), " ");
    assert_eq!(s.resolver.cursor(), (0, 1));

    s.type_chars("fi");
    assert_eq!(s.cell(0, 1), "five");
}

#[test]
fn navigation_mixes_arrows_and_letters() {
    let mut s = Session::new(Grid::new(4, 2, Legend::starter()));

    s.press(Key::Down);
    s.press(Key::Right);
    s.press(Key::Right);
    assert_eq!(s.resolver.cursor(), (2, 1));

    s.press(Key::Char('h'));
    s.press(Key::Char('k'));
    assert_eq!(s.resolver.cursor(), (1, 0));

    // Retag wherever we are, then walk back onto it and overwrite.
    s.type_chars("tw");
    assert_eq!(s.cell(1, 0), "two");
    s.press(Key::Char('H'));
    s.type_chars("th");
    assert_eq!(s.cell(1, 0), "three");
}

#[test]
fn wrapping_covers_the_whole_grid() {
    let mut s = Session::new(Grid::new(3, 2, Legend::starter()));

    // Six assignments walk every cell and return to the origin.
    for _ in 0..6 {
        s.type_chars("o");
    }
    assert_eq!(s.resolver.cursor(), (0, 0));
    for y in 0..2 {
        for x in 0..3 {
            assert_eq!(s.cell(x, y), "one");
        }
    }
}

// -------------------------------------------------------------------------
// Session end-to-end with the io layer
// -------------------------------------------------------------------------

#[test]
fn tag_save_reload_export() {
    let dir = tempdir().unwrap();
    let grid_path = dir.path().join("session.grid");
    let csv_path = dir.path().join("session.csv");

    let mut s = Session::new(Grid::new(4, 2, Legend::starter()));
    s.type_chars("o");
    s.type_chars("tw");
    s.type_chars("tw");
    s.press(Key::Char(' '));

    native::save(&s.grid, &grid_path).unwrap();
    let reloaded = native::load(&grid_path).unwrap();
    assert_eq!(reloaded, s.grid);

    export::export(&reloaded, &csv_path).unwrap();
    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(
        content,
        "\"Width\", \"Height\", \"Empty\", \"One bird\", \"Two birds\", \"Three birds\", \"Four birds\", \"Five birds\"\r\n\
         4, 2, 5, 1, 2, 0, 0, 0\r\n"
    );
}
