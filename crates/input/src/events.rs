//! Event types for resolver change notifications.
//!
//! The shell observes these to keep its status bar and grid view in sync
//! without polling. They're also what the test harness records to verify
//! ordering of buffer updates against assignments.

/// Events emitted by the shortcut resolver while it processes key input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverEvent {
    /// The pending shortcut buffer changed. Carries the full buffer content;
    /// empty when the resolver returned to idle. Emitted on every append and
    /// every reset, so a status bar can mirror the buffer verbatim.
    StatusChanged(String),

    /// A legend key was written to the cell at (x, y).
    CellAssigned { x: usize, y: usize, key: String },

    /// The cursor moved, by a movement key or the post-assignment advance.
    CursorMoved { x: usize, y: usize },
}

/// Callback type for receiving resolver events.
///
/// Everything runs on the shell's event loop thread, so the callback doesn't
/// need to be `Send`.
pub type EventCallback = Box<dyn FnMut(ResolverEvent)>;

/// Simple event collector for testing.
#[derive(Default)]
pub struct EventCollector {
    events: Vec<ResolverEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: ResolverEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[ResolverEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Status texts in emission order.
    pub fn statuses(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ResolverEvent::StatusChanged(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// (x, y, key) of each assignment, in order.
    pub fn assignments(&self) -> Vec<(usize, usize, &str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ResolverEvent::CellAssigned { x, y, key } => Some((*x, *y, key.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Cursor positions in emission order.
    pub fn cursor_moves(&self) -> Vec<(usize, usize)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ResolverEvent::CursorMoved { x, y } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }
}
