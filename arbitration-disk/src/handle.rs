// SPDX-License-Identifier: GPL-3.0-only

use std::fmt;
use std::sync::Arc;

use arbitration_contracts::{DeviceRegistry, EntryId, ProviderError};
use arbitration_types::PropertyBag;

/// Owned reference to a device registry entry
///
/// The entry is retained on creation and released exactly once when the
/// handle is dropped, whether that happens on a construction failure path or
/// at the end of the owning disk's life.
pub struct DeviceHandle {
    registry: Arc<dyn DeviceRegistry>,
    entry: EntryId,
}

impl DeviceHandle {
    pub fn retain(registry: Arc<dyn DeviceRegistry>, entry: EntryId) -> Self {
        registry.retain(entry);
        Self { registry, entry }
    }

    pub fn entry(&self) -> EntryId {
        self.entry
    }

    pub fn properties(&self) -> Result<PropertyBag, ProviderError> {
        self.registry.properties(self.entry)
    }

    /// Live predicate check against the entry's current properties
    pub fn matches(&self, criteria: &PropertyBag) -> bool {
        self.registry.match_predicate(self.entry, criteria)
    }
}

impl Drop for DeviceHandle {
    fn drop(&mut self) {
        self.registry.release(self.entry);
    }
}

impl fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("entry", &self.entry)
            .finish()
    }
}
