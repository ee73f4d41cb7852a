use crate::application::Navigator;
use crate::domain::HOME_FRAGMENT;

/// In-memory fragment history with browser-style back/forward.
#[derive(Debug, Clone)]
pub struct HistoryNavigator {
    entries: Vec<String>,
    index: usize,
}

impl HistoryNavigator {
    /// Starts with a single entry. A leading `#` is dropped and an empty
    /// fragment becomes `home`.
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![normalize(initial)],
            index: 0,
        }
    }
}

fn normalize(fragment: &str) -> String {
    let fragment = fragment.trim().trim_start_matches('#');
    if fragment.is_empty() {
        HOME_FRAGMENT.to_string()
    } else {
        fragment.to_string()
    }
}

impl Navigator for HistoryNavigator {
    fn current(&self) -> &str {
        &self.entries[self.index]
    }

    fn push(&mut self, fragment: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(normalize(fragment));
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, fragment: &str) {
        self.entries[self.index] = normalize(fragment);
    }

    fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}
