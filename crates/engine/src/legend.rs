use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Short key reserved for "nothing here". It is always the first entry of a
/// well-formed legend, and unassigned cells count under it in the histogram.
pub const EMPTY_KEY: &str = " ";

/// One legend row: the short key the user types and the display name shown
/// for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub key: String,
    pub name: String,
}

/// Ordered short-key → display-name mapping.
///
/// Keys are unique. Iteration order is insertion order and is significant:
/// it fixes the column order of the histogram export and the order prefix
/// matches come back in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The stock legend installed when no saved default grid exists.
    pub fn starter() -> Self {
        let mut legend = Legend::new();
        legend.set(EMPTY_KEY, "Empty");
        legend.set("one", "One bird");
        legend.set("two", "Two birds");
        legend.set("three", "Three birds");
        legend.set("four", "Four birds");
        legend.set("five", "Five birds");
        legend
    }

    /// Build a legend from (short key, display name) rows, the way the grid
    /// setup form collects them.
    ///
    /// The first row's short key is replaced with the reserved space key
    /// regardless of what was supplied, and reading stops at the first row
    /// with an empty key or an empty name.
    pub fn from_pairs<I, K, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, N)>,
        K: Into<String>,
        N: Into<String>,
    {
        let mut legend = Legend::new();
        for (i, (key, name)) in pairs.into_iter().enumerate() {
            let key = if i == 0 {
                EMPTY_KEY.to_string()
            } else {
                key.into()
            };
            let name = name.into();
            if key.is_empty() || name.is_empty() {
                break;
            }
            legend.set(&key, &name);
        }
        legend
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ordered iterator over the short keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Ordered iterator over the full entries.
    pub fn entries(&self) -> impl Iterator<Item = &LegendEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Display name for a short key.
    pub fn name(&self, key: &str) -> Result<&str, GridError> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.name.as_str())
            .ok_or_else(|| GridError::KeyNotFound {
                key: key.to_string(),
            })
    }

    /// Keys starting with `prefix`, in legend order.
    ///
    /// Matching is on the stored key string, not the display name. An empty
    /// prefix matches every key.
    pub fn matching(&self, prefix: &str) -> Vec<&str> {
        self.keys().filter(|k| k.starts_with(prefix)).collect()
    }

    /// Insert or overwrite an entry. A new key is appended to the iteration
    /// order; an existing key keeps its position and gets the new name.
    pub fn set(&mut self, key: &str, name: &str) {
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.name = name.to_string(),
            None => self.entries.push(LegendEntry {
                key: key.to_string(),
                name: name.to_string(),
            }),
        }
    }
}
