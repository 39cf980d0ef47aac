// SPDX-License-Identifier: GPL-3.0-only

//! Criteria matching over disk descriptions

use arbitration_types::PropertyBag;
use arbitration_types::keys::registry::PROPERTY_MATCH;

use crate::disk::Disk;

/// True when every criterion holds for `disk`
///
/// Each key must be present in the description with an equal value, except
/// `IOPropertyMatch`, whose bag is checked live against the disk's registry
/// entry. Disks without a registry entry never satisfy that key. Empty
/// criteria match every disk.
pub fn matches(disk: &Disk, criteria: &PropertyBag) -> bool {
    criteria.iter().all(|(key, expected)| {
        if key == PROPERTY_MATCH {
            match (disk.device(), expected.as_bag()) {
                (Some(device), Some(predicate)) => device.matches(predicate),
                _ => false,
            }
        } else {
            disk.description().get(key) == Some(expected)
        }
    })
}

impl Disk {
    pub fn matches(&self, criteria: &PropertyBag) -> bool {
        matches(self, criteria)
    }
}
