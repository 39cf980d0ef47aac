// SPDX-License-Identifier: GPL-3.0-only

//! Id-keyed collection of live disks

use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;
use std::hash::{Hash, Hasher};

use arbitration_types::PropertyBag;

use crate::disk::{Disk, hash_id};

/// Map key with the disk hashing contract: first 16 id bytes hashed, whole
/// id compared
#[derive(Clone, PartialEq, Eq)]
pub struct DiskKey(String);

impl DiskKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Hash for DiskKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_id(&self.0, state);
    }
}

impl fmt::Debug for DiskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl From<&Disk> for DiskKey {
    fn from(disk: &Disk) -> Self {
        Self::new(disk.id())
    }
}

/// The daemon's set of known disks
#[derive(Debug, Default)]
pub struct DiskRegistry {
    disks: HashMap<DiskKey, Disk>,
}

impl DiskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `disk`, returning the equal disk it replaces
    pub fn insert(&mut self, disk: Disk) -> Option<Disk> {
        self.disks.insert(DiskKey::from(&disk), disk)
    }

    pub fn get(&self, id: &str) -> Option<&Disk> {
        self.disks.get(&DiskKey::new(id))
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Disk> {
        self.disks.get_mut(&DiskKey::new(id))
    }

    /// Remove and return the disk; dropping it releases its registry entry
    pub fn remove(&mut self, id: &str) -> Option<Disk> {
        self.disks.remove(&DiskKey::new(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.disks.contains_key(&DiskKey::new(id))
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    pub fn iter(&self) -> hash_map::Values<'_, DiskKey, Disk> {
        self.disks.values()
    }

    pub fn iter_mut(&mut self) -> hash_map::ValuesMut<'_, DiskKey, Disk> {
        self.disks.values_mut()
    }

    /// Disks satisfying `criteria`, in no particular order
    pub fn matching<'a>(&'a self, criteria: &'a PropertyBag) -> impl Iterator<Item = &'a Disk> {
        self.iter().filter(move |disk| disk.matches(criteria))
    }
}

impl<'a> IntoIterator for &'a DiskRegistry {
    type Item = &'a Disk;
    type IntoIter = hash_map::Values<'a, DiskKey, Disk>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
