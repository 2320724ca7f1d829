//! In-memory registry of open popups, shared by the HTTP handlers.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::machine::PopupForm;

/// Default idle time before an abandoned popup is dropped (30 minutes).
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
struct Entry {
    form: PopupForm,
    last_activity: DateTime<Utc>,
}

/// Thread-safe store of popup instances keyed by id.
///
/// Each instance owns its field values exclusively; handlers only reach
/// them through [`PopupStore::update`].
#[derive(Debug, Clone, Default)]
pub struct PopupStore {
    inner: Arc<RwLock<HashMap<String, Entry>>>,
}

impl PopupStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a new popup (open, blank) and return its id.
    #[must_use]
    pub fn open(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let entry = Entry {
            form: PopupForm::opened(),
            last_activity: Utc::now(),
        };
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), entry);
        id
    }

    /// Run `f` against the popup with `id`, marking it active.
    ///
    /// Returns `None` if no such popup is mounted.
    pub fn update<R>(&self, id: &str, f: impl FnOnce(&mut PopupForm) -> R) -> Option<R> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let entry = guard.get_mut(id)?;
        entry.last_activity = Utc::now();
        Some(f(&mut entry.form))
    }

    /// Unmount the popup with `id`. Returns whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop popups idle for longer than `max_idle` as of `now`.
    /// Returns how many were dropped.
    pub fn prune_idle(&self, now: DateTime<Utc>, max_idle: Duration) -> usize {
        let max_idle = chrono::Duration::from_std(max_idle).unwrap_or(chrono::Duration::MAX);
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|_, entry| now.signed_duration_since(entry.last_activity) <= max_idle);
        before - guard.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::popup::form::{Field, FieldChange};
    use crate::popup::machine::Phase;

    #[test]
    fn open_update_remove() {
        let store = PopupStore::new();
        assert!(store.is_empty());

        let id = store.open();
        assert_eq!(store.len(), 1);
        assert_eq!(store.update(&id, |form| form.phase()), Some(Phase::Open));

        store
            .update(&id, |form| form.apply(FieldChange::new(Field::Name, "Ada")))
            .unwrap()
            .unwrap();
        let name = store.update(&id, |form| form.values().value(Field::Name).to_string());
        assert_eq!(name.as_deref(), Some("Ada"));

        assert!(store.remove(&id));
        assert!(!store.remove(&id));
        assert!(store.update(&id, |_| ()).is_none());
    }

    #[test]
    fn instances_are_independent() {
        let store = PopupStore::new();
        let a = store.open();
        let b = store.open();
        assert_ne!(a, b);

        store
            .update(&a, |form| form.apply(FieldChange::new(Field::Name, "Ada")))
            .unwrap()
            .unwrap();
        let other = store.update(&b, |form| form.values().value(Field::Name).to_string());
        assert_eq!(other.as_deref(), Some(""));
    }

    #[test]
    fn prunes_only_idle_popups() {
        let store = PopupStore::new();
        let id = store.open();

        assert_eq!(store.prune_idle(Utc::now(), DEFAULT_IDLE_TIMEOUT), 0);
        assert!(store.contains(&id));

        let later = Utc::now() + chrono::Duration::hours(1);
        assert_eq!(store.prune_idle(later, DEFAULT_IDLE_TIMEOUT), 1);
        assert!(store.is_empty());
    }
}
