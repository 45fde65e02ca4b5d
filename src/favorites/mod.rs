//! Tracked cities
//!
//! An ordered, duplicate-free list of city ids, persisted after every change.
//! Ids are resolved against a [`CityDirectory`] only when listed; ids the
//! directory no longer knows are skipped as stale references.

use crate::catalogs::{CityDirectory, CityRecord};
use crate::constants::{DEFAULT_TRACKED_CITIES, TRACKED_CITIES_KEY};
use crate::observer::{Observers, SubscriptionId};
use crate::storage::{load_json_or, store_json, SharedStore};
use log::debug;
use std::fmt;

/// The default tracked set, in display order
pub fn default_tracked_ids() -> Vec<String> {
    DEFAULT_TRACKED_CITIES.iter().map(|id| id.to_string()).collect()
}

/// Persisted ordered set of tracked city ids
pub struct FavoritesStore {
    store: SharedStore,
    ids: Vec<String>,
    observers: Observers<[String]>,
}

impl FavoritesStore {
    /// Load the tracked ids from `store`
    ///
    /// Absent or unparsable data yields the three-city default. Repeated ids
    /// keep their first position.
    pub fn new(store: SharedStore) -> Self {
        let loaded: Vec<String> = load_json_or(store.as_ref(), TRACKED_CITIES_KEY, default_tracked_ids);

        let mut ids: Vec<String> = Vec::with_capacity(loaded.len());
        for id in loaded {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        Self {
            store,
            ids,
            observers: Observers::new(),
        }
    }

    /// Track `id`. Returns false if it was already tracked.
    pub fn add(&mut self, id: &str) -> bool {
        if self.has(id) {
            return false;
        }
        self.ids.push(id.to_string());
        debug!("Tracking {}", id);
        self.changed();
        true
    }

    /// Stop tracking `id`. Returns false if it was not tracked.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|tracked| tracked != id);
        if self.ids.len() == before {
            return false;
        }
        debug!("No longer tracking {}", id);
        self.changed();
        true
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now tracked.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.add(id)
        }
    }

    /// Restore the default tracked set
    pub fn reset(&mut self) {
        self.ids = default_tracked_ids();
        debug!("Tracked cities reset to defaults");
        self.changed();
    }

    pub fn has(&self, id: &str) -> bool {
        self.ids.iter().any(|tracked| tracked == id)
    }

    /// Tracked ids in insertion order, including any the catalog no longer has
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Tracked cities resolved against `directory`, in insertion order
    pub fn list<'d>(&self, directory: &'d CityDirectory) -> Vec<&'d CityRecord> {
        self.ids
            .iter()
            .filter_map(|id| {
                let city = directory.by_id(id);
                if city.is_none() {
                    debug!("Skipping stale tracked city id {:?}", id);
                }
                city
            })
            .collect()
    }

    /// Call `callback` with the full id list after every change
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[String]) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn changed(&mut self) {
        store_json(self.store.as_ref(), TRACKED_CITIES_KEY, &self.ids);
        self.observers.notify(&self.ids);
    }
}

impl fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("ids", &self.ids)
            .field("observers", &self.observers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FailingStore, FileStore, MemoryStore};
    use rstest::rstest;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::tempdir;

    fn ids_of(cities: &[&CityRecord]) -> Vec<String> {
        cities.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_empty_storage_seeds_defaults() {
        let favorites = FavoritesStore::new(Rc::new(MemoryStore::new()));
        assert_eq!(favorites.ids(), ["new-york", "london", "tokyo"]);
    }

    #[rstest]
    #[case("not json at all")]
    #[case("{\"ids\": []}")]
    #[case("[1, 2, 3]")]
    #[case("")]
    fn test_corrupt_storage_seeds_defaults(#[case] raw: &str) {
        let store = MemoryStore::with_entries([(TRACKED_CITIES_KEY, raw)]);
        let favorites = FavoritesStore::new(Rc::new(store));

        let listed = favorites.list(CityDirectory::world());
        assert_eq!(ids_of(&listed), vec!["new-york", "london", "tokyo"]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut favorites = FavoritesStore::new(Rc::new(MemoryStore::new()));
        assert!(favorites.add("paris"));
        let len = favorites.list(CityDirectory::world()).len();

        assert!(!favorites.add("paris"));
        assert_eq!(favorites.list(CityDirectory::world()).len(), len);
        assert_eq!(favorites.ids().iter().filter(|id| *id == "paris").count(), 1);
    }

    #[test]
    fn test_add_remove_has() {
        let mut favorites = FavoritesStore::new(Rc::new(MemoryStore::new()));

        favorites.add("sydney");
        assert!(favorites.has("sydney"));

        assert!(favorites.remove("sydney"));
        assert!(!favorites.has("sydney"));
        assert!(!favorites.remove("sydney"));
    }

    #[test]
    fn test_every_mutation_persists() {
        let store = MemoryStore::new();
        let mut favorites = FavoritesStore::new(Rc::new(store.clone()));

        favorites.add("cairo");
        assert_eq!(
            store.raw(TRACKED_CITIES_KEY).as_deref(),
            Some(r#"["new-york","london","tokyo","cairo"]"#)
        );

        favorites.remove("london");
        assert_eq!(
            store.raw(TRACKED_CITIES_KEY).as_deref(),
            Some(r#"["new-york","tokyo","cairo"]"#)
        );

        favorites.reset();
        assert_eq!(
            store.raw(TRACKED_CITIES_KEY).as_deref(),
            Some(r#"["new-york","london","tokyo"]"#)
        );
    }

    #[test]
    fn test_unavailable_storage_keeps_session_state() {
        let mut favorites = FavoritesStore::new(Rc::new(FailingStore));
        assert_eq!(favorites.ids(), ["new-york", "london", "tokyo"]);

        let seen = Rc::new(RefCell::new(0));
        let count = Rc::clone(&seen);
        favorites.subscribe(move |_| *count.borrow_mut() += 1);

        assert!(favorites.add("paris"));
        assert!(favorites.has("paris"));
        assert!(favorites.remove("london"));
        assert_eq!(favorites.ids(), ["new-york", "tokyo", "paris"]);
        assert_eq!(*seen.borrow(), 2);
    }

    #[test]
    fn test_stale_ids_are_dropped_from_list() {
        let store = MemoryStore::with_entries([(
            TRACKED_CITIES_KEY,
            r#"["tokyo","gotham","paris","metropolis"]"#,
        )]);
        let favorites = FavoritesStore::new(Rc::new(store));

        assert_eq!(favorites.len(), 4);
        let listed = favorites.list(CityDirectory::world());
        assert_eq!(ids_of(&listed), vec!["tokyo", "paris"]);
    }

    #[test]
    fn test_loaded_duplicates_keep_first_position() {
        let store =
            MemoryStore::with_entries([(TRACKED_CITIES_KEY, r#"["paris","tokyo","paris"]"#)]);
        let favorites = FavoritesStore::new(Rc::new(store));
        assert_eq!(favorites.ids(), ["paris", "tokyo"]);
    }

    #[test]
    fn test_empty_list_is_respected() {
        let store = MemoryStore::with_entries([(TRACKED_CITIES_KEY, "[]")]);
        let favorites = FavoritesStore::new(Rc::new(store));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut favorites = FavoritesStore::new(Rc::new(MemoryStore::new()));
        assert!(favorites.toggle("dubai"));
        assert!(favorites.has("dubai"));
        assert!(!favorites.toggle("dubai"));
        assert!(!favorites.has("dubai"));
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let mut favorites = FavoritesStore::new(Rc::new(MemoryStore::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&seen);
        let id = favorites.subscribe(move |ids| log.borrow_mut().push(ids.len()));

        favorites.add("seoul");
        favorites.add("seoul");
        favorites.remove("tokyo");
        assert!(favorites.unsubscribe(id));
        favorites.add("tokyo");

        assert_eq!(*seen.borrow(), vec![4, 3]);
    }

    #[test]
    fn test_survives_restart_with_file_store() {
        let dir = tempdir().unwrap();

        {
            let store = FileStore::open(dir.path()).unwrap();
            let mut favorites = FavoritesStore::new(Rc::new(store));
            favorites.remove("new-york");
            favorites.add("mumbai");
        }

        let store = FileStore::open(dir.path()).unwrap();
        let favorites = FavoritesStore::new(Rc::new(store));
        assert_eq!(favorites.ids(), ["london", "tokyo", "mumbai"]);
    }
}
