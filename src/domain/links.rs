/// Title reserved for the link back to the source issue.
pub const SOURCE_LINK_TITLE: &str = "Github Issue";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub title: String,
    pub url: String,
}

impl LinkEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Parses an operator link: `Title=URL`, or anything else titled by itself.
    /// The split only applies when the right side carries a scheme and the left
    /// side does not, so `=` inside a query string stays part of the URL.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        match value.split_once('=') {
            Some((title, url))
                if !title.contains("://")
                    && !title.trim().is_empty()
                    && url.contains("://") =>
            {
                Self::new(title.trim(), url.trim())
            }
            _ => Self::new(value, value),
        }
    }
}

/// Title-keyed links in insertion order. Re-adding a title replaces its URL
/// in place.
#[derive(Debug, Clone, Default)]
pub struct LinkRegistry {
    entries: Vec<LinkEntry>,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, title: impl Into<String>, url: impl Into<String>) {
        let title = title.into();
        let url = url.into();
        match self.entries.iter_mut().find(|entry| entry.title == title) {
            Some(existing) => existing.url = url,
            None => self.entries.push(LinkEntry { title, url }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a LinkRegistry {
    type Item = &'a LinkEntry;
    type IntoIter = std::slice::Iter<'a, LinkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
