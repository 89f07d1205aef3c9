use std::collections::{HashMap, HashSet};

use super::item_kind::{ItemId, ItemKind};

/// Item metadata provided by the host game: names, tags and tooltips.
pub trait ItemCatalog {
    fn display_name(&self, id: &ItemId) -> String;

    fn has_tag(&self, id: &ItemId, tag: &str) -> bool;

    fn tags(&self, id: &ItemId) -> Vec<String>;

    /// Lines shown when hovering the item
    fn tooltip(&self, kind: &ItemKind) -> Vec<String> {
        let name = match &kind.data().custom_name {
            Some(name) => name.clone(),
            None => self.display_name(kind.id()),
        };
        let mut lines = vec![name];
        for (key, value) in &kind.data().tags {
            lines.push(format!("{}: {}", key, value));
        }
        lines
    }
}

struct CatalogEntry {
    display_name: String,
    tags: HashSet<String>,
}

/// An in-memory [`ItemCatalog`]. Unknown ids fall back to their path.
#[derive(Default)]
pub struct MapItemCatalog {
    entries: HashMap<ItemId, CatalogEntry>,
}

impl MapItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<ItemId>, display_name: &str, tags: &[&str]) -> &mut Self {
        self.entries.insert(
            id.into(),
            CatalogEntry {
                display_name: display_name.to_string(),
                tags: tags.iter().map(|tag| tag.to_string()).collect(),
            },
        );

        self
    }
}

impl ItemCatalog for MapItemCatalog {
    fn display_name(&self, id: &ItemId) -> String {
        match self.entries.get(id) {
            Some(entry) => entry.display_name.clone(),
            None => id.path().to_string(),
        }
    }

    fn has_tag(&self, id: &ItemId, tag: &str) -> bool {
        self.entries
            .get(id)
            .map(|entry| entry.tags.contains(tag))
            .unwrap_or(false)
    }

    fn tags(&self, id: &ItemId) -> Vec<String> {
        let Some(entry) = self.entries.get(id) else {
            return Vec::new();
        };
        let mut tags: Vec<String> = entry.tags.iter().cloned().collect();
        tags.sort();
        tags
    }
}
