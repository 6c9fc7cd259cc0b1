//! Back/forward history of shareable locations.

use super::location::Location;

/// Oldest entries are dropped past this many.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Linear history with a cursor, like a browser tab.
///
/// `replace` rewrites the current entry, `push` truncates any forward
/// entries and appends, dropping the oldest entry once the history holds
/// [`MAX_HISTORY_ENTRIES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationHistory {
    entries: Vec<Location>,
    cursor: usize,
}

impl LocationHistory {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.cursor]
    }

    pub fn replace(&mut self, location: Location) {
        self.entries[self.cursor] = location;
    }

    pub fn push(&mut self, location: Location) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location);
        if self.entries.len() > MAX_HISTORY_ENTRIES {
            let excess = self.entries.len() - MAX_HISTORY_ENTRIES;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Steps back; returns false at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Steps forward; returns false at the newest entry.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_does_not_grow_history() {
        let mut history = LocationHistory::new(Location::parse("/p"));
        history.replace(Location::parse("/p?page=2"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().get("page"), Some("2"));
    }

    #[test]
    fn push_drops_forward_entries() {
        let mut history = LocationHistory::new(Location::parse("/a"));
        history.push(Location::parse("/b"));
        history.push(Location::parse("/c"));
        assert!(history.back());
        assert!(history.back());
        assert!(!history.back());
        history.push(Location::parse("/d"));
        assert_eq!(history.len(), 2);
        assert!(!history.forward());
        assert_eq!(history.current().path(), "/d");
    }

    #[test]
    fn push_caps_history_at_oldest_entry() {
        let mut history = LocationHistory::new(Location::parse("/p?page=0"));
        for page in 1..=MAX_HISTORY_ENTRIES {
            history.push(Location::parse(&format!("/p?page={}", page)));
        }
        assert_eq!(history.len(), MAX_HISTORY_ENTRIES);
        while history.back() {}
        assert_eq!(history.current().get("page"), Some("1"));
    }
}
