use std::collections::BTreeSet;

/// Pack names members are allowed to open.
///
/// Stored as given, compared case-insensitively. Rendered as one name per line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Whitelist {
    entries: BTreeSet<String>,
}

impl Whitelist {
    /// Builds a whitelist from newline-delimited text, ignoring blank lines.
    pub fn from_lines(text: &str) -> Self {
        let mut whitelist = Self::default();
        for line in text.lines() {
            whitelist.set_entry(line, true);
        }
        whitelist
    }

    pub fn render(&self) -> String {
        self.entries.iter().cloned().collect::<Vec<_>>().join("\n")
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim();
        self.entries.iter().any(|entry| entry.eq_ignore_ascii_case(name))
    }

    /// Allows or disallows a pack name.
    ///
    /// # Returns
    /// - `true` - The whitelist changed
    pub fn set_entry(&mut self, name: &str, allowed: bool) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        if allowed {
            if self.contains(name) {
                return false;
            }
            self.entries.insert(name.to_string())
        } else {
            let before = self.entries.len();
            self.entries.retain(|entry| !entry.eq_ignore_ascii_case(name));
            before != self.entries.len()
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
