use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Identifiers of the pictures that can be put under a board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCatalog {
    ids: Vec<String>,
}

impl ImageCatalog {
    /// Shipped pictures, numbered with gaps.
    pub const BUILTIN: &'static [u16] = &[
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 13, 14, 15, 16, 17, 18, 19, 20, 22, 24, 25, 26, 27, 28,
        29, 30, 31, 32,
    ];

    pub fn new<I, T>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        Ok(Self { ids })
    }

    pub fn builtin() -> Self {
        Self {
            ids: Self::BUILTIN.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn available<'a>(&'a self, used: &BTreeSet<String>) -> impl Iterator<Item = &'a str> {
        self.ids
            .iter()
            .filter(|id| !used.contains(id.as_str()))
            .map(String::as_str)
    }

    /// Uniform pick among pictures not in `used`, or among all of them once every picture has been used.
    pub fn choose<R: Rng + ?Sized>(&self, used: &BTreeSet<String>, rng: &mut R) -> &str {
        let available: Vec<&str> = self.available(used).collect();
        if let Some(id) = pick(&available, rng) {
            return id;
        }

        log::warn!(
            "All {} images already used, picking from the full catalog",
            self.ids.len()
        );
        let all: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        pick(&all, rng).unwrap_or_default()
    }

    /// Like [`Self::choose`] but never returns `current`, so a replaced picture always changes.
    ///
    /// `None` when `current` is the only picture in the catalog.
    pub fn choose_other<R: Rng + ?Sized>(
        &self,
        used: &BTreeSet<String>,
        current: &str,
        rng: &mut R,
    ) -> Option<&str> {
        let available: Vec<&str> = self.available(used).filter(|id| *id != current).collect();
        if let Some(id) = pick(&available, rng) {
            return Some(id);
        }

        let others: Vec<&str> = self
            .ids
            .iter()
            .map(String::as_str)
            .filter(|id| *id != current)
            .collect();
        pick(&others, rng)
    }
}

impl Default for ImageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn pick<'a, R: Rng + ?Sized>(ids: &[&'a str], rng: &mut R) -> Option<&'a str> {
    if ids.is_empty() {
        return None;
    }
    ids.get(rng.random_range(0..ids.len())).copied()
}

/// A loaded picture, as reported by whoever displays it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub id: String,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> Result<f64> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidImageSize);
        }
        validate_aspect_ratio(f64::from(self.width) / f64::from(self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn used(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn builtin_catalog_skips_missing_numbers() {
        let catalog = ImageCatalog::builtin();

        assert_eq!(catalog.ids().len(), 29);
        assert!(!catalog.ids().iter().any(|id| id == "11" || id == "21" || id == "23"));
        assert_eq!(catalog.ids().first().map(String::as_str), Some("1"));
        assert_eq!(catalog.ids().last().map(String::as_str), Some("32"));
    }

    #[test]
    fn choose_never_returns_used_image() {
        let catalog = ImageCatalog::new(["a", "b", "c"]).unwrap();
        let exclusions = used(&["a", "c"]);
        let mut rng = SmallRng::seed_from_u64(0);

        for _ in 0..50 {
            assert_eq!(catalog.choose(&exclusions, &mut rng), "b");
        }
    }

    #[test]
    fn choose_falls_back_to_full_catalog_when_exhausted() {
        let catalog = ImageCatalog::new(["a", "b"]).unwrap();
        let exclusions = used(&["a", "b"]);
        let mut rng = SmallRng::seed_from_u64(1);

        let id = catalog.choose(&exclusions, &mut rng);
        assert!(id == "a" || id == "b");
    }

    #[test]
    fn choose_other_skips_current_image() {
        let catalog = ImageCatalog::new(["a", "b", "c"]).unwrap();
        let mut rng = SmallRng::seed_from_u64(2);

        for _ in 0..50 {
            assert_eq!(catalog.choose_other(&used(&["c"]), "a", &mut rng), Some("b"));
        }
    }

    #[test]
    fn choose_other_prefers_used_image_over_current() {
        let catalog = ImageCatalog::new(["a", "b"]).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);

        assert_eq!(catalog.choose_other(&used(&["b"]), "a", &mut rng), Some("b"));
        assert_eq!(catalog.choose_other(&used(&["a", "b"]), "b", &mut rng), Some("a"));
    }

    #[test]
    fn choose_other_with_single_image_has_nothing_to_offer() {
        let catalog = ImageCatalog::new(["only"]).unwrap();
        let mut rng = SmallRng::seed_from_u64(4);

        assert_eq!(catalog.choose_other(&used(&[]), "only", &mut rng), None);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(
            ImageCatalog::new(Vec::<String>::new()),
            Err(GameError::EmptyCatalog)
        );
    }

    #[test]
    fn aspect_ratio_is_width_over_height() {
        assert_eq!(ImageInfo::new("1", 1600, 900).aspect_ratio(), Ok(16.0 / 9.0));
        assert_eq!(
            ImageInfo::new("1", 0, 900).aspect_ratio(),
            Err(GameError::InvalidImageSize)
        );
        assert_eq!(
            ImageInfo::new("1", 10, 0).aspect_ratio(),
            Err(GameError::InvalidImageSize)
        );
    }
}
