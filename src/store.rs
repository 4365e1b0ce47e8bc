//! Flat name → raster table.
//!
//! Last write wins; entries are never removed. Rasters are immutable, so a
//! reader holding a reference (or a clone) never observes a later write.
//! The store does no locking of its own.
use crate::image::Raster;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct RasterStore {
    rasters: HashMap<String, Raster>,
}

impl RasterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `raster` under `name`, returning the raster it replaced.
    pub fn insert(&mut self, name: impl Into<String>, raster: Raster) -> Option<Raster> {
        self.rasters.insert(name.into(), raster)
    }

    pub fn get(&self, name: &str) -> Option<&Raster> {
        self.rasters.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rasters.contains_key(name)
    }

    /// Stored names in ascending order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rasters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.rasters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rasters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Pixel;

    #[test]
    fn last_write_wins() {
        let a = Raster::new(1, 1, vec![Pixel::BLACK], "a.ppm").unwrap();
        let b = Raster::new(1, 1, vec![Pixel::WHITE], "b.ppm").unwrap();
        let mut store = RasterStore::new();
        assert!(store.insert("x", a.clone()).is_none());
        let held = store.get("x").cloned();
        assert_eq!(store.insert("x", b.clone()), Some(a.clone()));
        assert_eq!(store.get("x"), Some(&b));
        assert_eq!(held, Some(a));
        store.insert("w", b);
        assert_eq!(store.names(), vec!["w", "x"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn contains_tracks_inserted_names() {
        let mut store = RasterStore::new();
        assert!(store.is_empty());
        assert!(!store.contains("x"));
        store.insert("x", Raster::new(1, 1, vec![Pixel::BLACK], "a.ppm").unwrap());
        assert!(store.contains("x"));
        assert!(!store.contains("X"));
        assert!(!store.is_empty());
    }
}
