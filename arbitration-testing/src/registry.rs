// SPDX-License-Identifier: GPL-3.0-only

//! In-memory device registry

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use arbitration_contracts::{
    Ancestor, DeviceRegistry, EntryId, Plane, ProviderError, ProviderErrorKind,
};
use arbitration_types::{PropertyBag, PropertyValue};

/// One registry entry, assembled builder-style before insertion
#[derive(Debug, Clone, Default)]
pub struct FakeEntry {
    parent: Option<EntryId>,
    classes: Vec<String>,
    names: HashMap<Plane, Vec<u8>>,
    paths: HashMap<Plane, Vec<u8>>,
    properties: PropertyBag,
    failing: bool,
}

impl FakeEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child_of(mut self, parent: EntryId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn name(mut self, plane: Plane, name: impl Into<Vec<u8>>) -> Self {
        self.names.insert(plane, name.into());
        self
    }

    /// Registry path; having one in a plane puts the entry in that plane
    pub fn path(mut self, plane: Plane, path: impl Into<Vec<u8>>) -> Self {
        self.paths.insert(plane, path.into());
        self
    }

    pub fn property(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key, value);
        self
    }

    pub fn properties(mut self, properties: PropertyBag) -> Self {
        self.properties = properties;
        self
    }
}

#[derive(Debug, Default)]
struct State {
    entries: BTreeMap<EntryId, FakeEntry>,
    references: HashMap<EntryId, i64>,
    next_id: u64,
}

/// Device registry double with live reference counting
#[derive(Debug, Default)]
pub struct FakeRegistry {
    state: Mutex<State>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, entry: FakeEntry) -> EntryId {
        let mut state = self.lock();
        state.next_id += 1;
        let id = EntryId(state.next_id);
        state.entries.insert(id, entry);
        id
    }

    pub fn set_property(&self, entry: EntryId, key: &str, value: impl Into<PropertyValue>) {
        if let Some(entry) = self.lock().entries.get_mut(&entry) {
            entry.properties.insert(key, value);
        }
    }

    pub fn remove_property(&self, entry: EntryId, key: &str) {
        if let Some(entry) = self.lock().entries.get_mut(&entry) {
            entry.properties.remove(key);
        }
    }

    /// Remove `key` from every entry in the registry
    pub fn remove_property_everywhere(&self, key: &str) {
        for entry in self.lock().entries.values_mut() {
            entry.properties.remove(key);
        }
    }

    pub fn add_class(&self, entry: EntryId, class: &str) {
        if let Some(entry) = self.lock().entries.get_mut(&entry) {
            entry.classes.push(class.to_string());
        }
    }

    pub fn set_name(&self, entry: EntryId, plane: Plane, name: impl Into<Vec<u8>>) {
        if let Some(entry) = self.lock().entries.get_mut(&entry) {
            entry.names.insert(plane, name.into());
        }
    }

    pub fn remove_name(&self, entry: EntryId, plane: Plane) {
        if let Some(entry) = self.lock().entries.get_mut(&entry) {
            entry.names.remove(&plane);
        }
    }

    pub fn remove_path(&self, entry: EntryId, plane: Plane) {
        if let Some(entry) = self.lock().entries.get_mut(&entry) {
            entry.paths.remove(&plane);
        }
    }

    /// Make `properties(entry)` fail from now on
    pub fn fail_properties(&self, entry: EntryId) {
        if let Some(entry) = self.lock().entries.get_mut(&entry) {
            entry.failing = true;
        }
    }

    /// Retains not yet matched by a release, for one entry
    pub fn references(&self, entry: EntryId) -> i64 {
        self.lock().references.get(&entry).copied().unwrap_or(0)
    }

    /// Retains not yet matched by a release, across all entries
    pub fn outstanding_references(&self) -> i64 {
        self.lock().references.values().sum()
    }

    fn with_entry<T>(
        &self,
        entry: EntryId,
        read: impl FnOnce(&FakeEntry) -> Result<T, ProviderError>,
    ) -> Result<T, ProviderError> {
        let state = self.lock();
        let found = state
            .entries
            .get(&entry)
            .ok_or_else(|| ProviderError::not_found(format!("no registry entry {}", entry.0)))?;
        read(found)
    }

    /// `entry` itself, then its ancestors nearest first
    fn lineage(state: &State, entry: EntryId) -> Vec<EntryId> {
        let mut lineage = Vec::new();
        let mut current = Some(entry);
        while let Some(id) = current {
            let Some(found) = state.entries.get(&id) else {
                break;
            };
            lineage.push(id);
            current = found.parent;
        }
        lineage
    }
}

impl DeviceRegistry for FakeRegistry {
    fn properties(&self, entry: EntryId) -> Result<PropertyBag, ProviderError> {
        self.with_entry(entry, |found| {
            if found.failing {
                Err(ProviderError::new(
                    ProviderErrorKind::Unavailable,
                    format!("properties of entry {} unavailable", entry.0),
                ))
            } else {
                Ok(found.properties.clone())
            }
        })
    }

    fn name(&self, entry: EntryId, plane: Plane) -> Result<Vec<u8>, ProviderError> {
        self.with_entry(entry, |found| {
            found.names.get(&plane).cloned().ok_or_else(|| {
                ProviderError::not_found(format!("entry {} has no name in {plane:?}", entry.0))
            })
        })
    }

    fn path(&self, entry: EntryId, plane: Plane) -> Result<Vec<u8>, ProviderError> {
        self.with_entry(entry, |found| {
            found.paths.get(&plane).cloned().ok_or_else(|| {
                ProviderError::not_found(format!("entry {} is not in {plane:?}", entry.0))
            })
        })
    }

    fn conforms_to(&self, entry: EntryId, class: &str) -> bool {
        self.lock()
            .entries
            .get(&entry)
            .is_some_and(|found| found.classes.iter().any(|c| c == class))
    }

    fn find_ancestor(&self, entry: EntryId, condition: Ancestor<'_>) -> Option<EntryId> {
        let state = self.lock();
        Self::lineage(&state, entry)
            .into_iter()
            .skip(1)
            .find(|id| {
                state.entries.get(id).is_some_and(|found| match condition {
                    Ancestor::ConformsTo(class) => found.classes.iter().any(|c| c == class),
                    Ancestor::InPlane(plane) => found.paths.contains_key(&plane),
                })
            })
    }

    fn search_upward(&self, entry: EntryId, key: &str) -> Option<PropertyValue> {
        let state = self.lock();
        Self::lineage(&state, entry)
            .into_iter()
            .find_map(|id| state.entries.get(&id)?.properties.get(key).cloned())
    }

    fn match_predicate(&self, entry: EntryId, criteria: &PropertyBag) -> bool {
        self.lock().entries.get(&entry).is_some_and(|found| {
            criteria
                .iter()
                .all(|(key, value)| found.properties.get(key) == Some(value))
        })
    }

    fn retain(&self, entry: EntryId) {
        *self.lock().references.entry(entry).or_insert(0) += 1;
    }

    fn release(&self, entry: EntryId) {
        *self.lock().references.entry(entry).or_insert(0) -= 1;
    }
}
