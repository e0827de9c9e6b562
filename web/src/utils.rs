use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;
use unveil_core::{CellCount, GameConfig, TileId};

/// Fixed localStorage key a value is saved under.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault: Sized {
    fn local_or_default() -> Self;
}

impl<T: StorageKey + Default + DeserializeOwned> LocalOrDefault for T {
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).unwrap_or_default()
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
    fn local_delete();
}

impl<T: StorageKey + Serialize> LocalSave for T {
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("Could not save {} to local storage: {:?}", T::KEY, err);
        }
    }

    fn local_delete() {
        LocalStorage::delete(T::KEY);
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn viewport_height() -> f64 {
    use gloo::utils::{document_element, window};
    let client = f64::from(document_element().client_height());
    let inner = window()
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .unwrap_or(0.0);
    client.max(inner)
}

/// Largest size with the given aspect ratio that fits the box, filling the height first.
pub(crate) fn fit_within(aspect_ratio: f64, max_width: f64, max_height: f64) -> Option<(f64, f64)> {
    if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
        return None;
    }

    let mut height = max_height;
    let mut width = height * aspect_ratio;
    if width > max_width {
        width = max_width;
        height = width / aspect_ratio;
    }
    Some((width, height))
}

/// Start menu input, anything unparsable falls back to the default tile count.
pub(crate) fn parse_tile_count(input: &str) -> CellCount {
    input
        .trim()
        .parse::<CellCount>()
        .ok()
        .filter(|&count| count > 0)
        .unwrap_or(GameConfig::DEFAULT_TILE_COUNT)
}

pub(crate) fn format_chosen(chosen: &[TileId]) -> String {
    chosen
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn image_url(id: &str) -> String {
    format!("./media/{}.jpg", id)
}
