//! Test harness for driving the resolver without a real event loop.
//!
//! Wraps a grid and resolver with an event collector and a manual stand-in
//! for the host's one-shot ambiguity timer, so tests can press keys, let the
//! pretend timer fire, and assert on the emitted events.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gridmark_engine::grid::Grid;

use crate::events::EventCollector;
use crate::keys::Key;
use crate::resolver::{ShortcutResolver, TimerAction};

pub struct InputHarness {
    pub grid: Grid,
    pub resolver: ShortcutResolver,
    pub events: Rc<RefCell<EventCollector>>,
    /// Duration the pretend one-shot is armed with, if any.
    pub armed: Option<Duration>,
}

impl InputHarness {
    pub fn new(grid: Grid) -> Self {
        let events = Rc::new(RefCell::new(EventCollector::new()));
        let sink = Rc::clone(&events);

        let mut resolver = ShortcutResolver::new();
        resolver.set_event_callback(Box::new(move |event| sink.borrow_mut().push(event)));

        Self {
            grid,
            resolver,
            events,
            armed: None,
        }
    }

    /// Press a key and do the host's timer bookkeeping.
    pub fn key(&mut self, key: Key) {
        let action = self
            .resolver
            .handle_key(&mut self.grid, key)
            .expect("cursor stays in bounds");
        self.apply(action);
    }

    /// Apply a timer action the way the host loop would.
    pub fn apply(&mut self, action: TimerAction) {
        match action {
            TimerAction::None => {}
            TimerAction::Arm(duration) => self.armed = Some(duration),
            TimerAction::Cancel => self.armed = None,
        }
    }

    /// Let the pretend one-shot fire, if armed.
    pub fn fire_timer(&mut self) {
        if self.armed.take().is_some() {
            self.resolver.timeout_elapsed();
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> &str {
        self.grid.data(x, y).expect("cell in bounds")
    }

    /// Collected status texts, oldest first.
    pub fn statuses(&self) -> Vec<String> {
        self.events
            .borrow()
            .statuses()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
