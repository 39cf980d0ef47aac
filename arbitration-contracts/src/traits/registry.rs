// SPDX-License-Identifier: GPL-3.0-only

//! Device registry contract
//!
//! The registry is a tree of hardware entries. Each entry belongs to one or
//! more classes, appears in one or more planes, and publishes a property bag.
//! This trait is the only platform-specific dependency of disk construction.

use arbitration_types::{PropertyBag, PropertyValue};

use crate::ProviderError;

/// Opaque identifier of a registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u64);

/// Registry plane an entry name or path is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    /// Driver/service attachment tree
    Service,
    /// Firmware device tree
    DeviceTree,
}

/// Condition an ancestor must satisfy in [`DeviceRegistry::find_ancestor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ancestor<'a> {
    ConformsTo(&'a str),
    InPlane(Plane),
}

pub trait DeviceRegistry: Send + Sync {
    /// Snapshot of the properties an entry publishes
    fn properties(&self, entry: EntryId) -> Result<PropertyBag, ProviderError>;

    /// Raw entry name in `plane`; the encoding is not guaranteed
    fn name(&self, entry: EntryId, plane: Plane) -> Result<Vec<u8>, ProviderError>;

    /// Raw registry path of the entry in `plane`
    fn path(&self, entry: EntryId, plane: Plane) -> Result<Vec<u8>, ProviderError>;

    fn conforms_to(&self, entry: EntryId, class: &str) -> bool;

    /// Nearest ancestor (excluding `entry`) satisfying `condition`.
    ///
    /// The returned id is not retained on behalf of the caller.
    fn find_ancestor(&self, entry: EntryId, condition: Ancestor<'_>) -> Option<EntryId>;

    /// Value of `key` on `entry` or, failing that, on its nearest ancestor
    /// publishing it.
    fn search_upward(&self, entry: EntryId, key: &str) -> Option<PropertyValue>;

    /// Live check of `criteria` against the entry's current properties
    fn match_predicate(&self, entry: EntryId, criteria: &PropertyBag) -> bool;

    fn retain(&self, entry: EntryId);

    fn release(&self, entry: EntryId);
}
