use crate::utils::*;
use std::collections::BTreeSet;
use unveil_core::{UsedImageStore, UsedImages};

impl StorageKey for UsedImages {
    const KEY: &'static str = "unveil:used-images:v1";
}

/// Used pictures mirrored into localStorage on every change.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalUsedImages {
    used: UsedImages,
}

impl LocalUsedImages {
    pub(crate) fn load() -> Self {
        let used: UsedImages = LocalOrDefault::local_or_default();
        log::debug!("{} images already used", used.len());
        Self { used }
    }
}

impl UsedImageStore for LocalUsedImages {
    fn read(&self) -> BTreeSet<String> {
        self.used.read()
    }

    fn add(&mut self, id: &str) {
        if self.used.insert(id) {
            self.used.local_save();
        }
    }

    fn clear(&mut self) {
        self.used.clear();
        UsedImages::local_delete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_uses_versioned_namespace() {
        assert_eq!(<UsedImages as StorageKey>::KEY, "unveil:used-images:v1");
    }
}
