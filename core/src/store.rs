use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Where the identifiers of finished pictures are remembered between sessions.
pub trait UsedImageStore {
    fn read(&self) -> BTreeSet<String>;
    fn add(&mut self, id: &str);
    fn clear(&mut self);
}

/// Used identifiers in the order they were finished, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsedImages {
    ids: Vec<String>,
}

impl UsedImages {
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.into());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|used| used == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl UsedImageStore for UsedImages {
    fn read(&self) -> BTreeSet<String> {
        self.ids.iter().cloned().collect()
    }

    fn add(&mut self, id: &str) {
        if self.insert(id) {
            log::debug!("marked image {} as used", id);
        }
    }

    fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent_and_keeps_order() {
        let mut store = UsedImages::default();
        store.add("7");
        store.add("3");
        store.add("7");

        assert_eq!(store.iter().collect::<Vec<_>>(), ["7", "3"]);
        assert_eq!(store.read().len(), 2);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut store = UsedImages::default();
        store.add("1");
        store.clear();

        assert!(store.is_empty());
        assert!(store.read().is_empty());
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut store = UsedImages::default();
        store.add("4");
        store.add("12");

        assert_eq!(serde_json::to_string(&store).unwrap(), r#"["4","12"]"#);
        let back: UsedImages = serde_json::from_str(r#"["9"]"#).unwrap();
        assert!(back.contains("9"));
    }
}
