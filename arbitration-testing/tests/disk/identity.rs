// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashSet;

use arbitration_disk::DiskRegistry;
use arbitration_testing::fixtures;
use arbitration_types::PropertyBag;
use arbitration_types::keys::description;

use crate::common::build;

#[test]
fn rebuilt_disk_is_the_same_disk() {
    let tree = fixtures::sample_whole_disk();
    let first = build(&tree);
    let mut second = build(&tree);
    second.set_description(description::VOLUME_NAME, Some("Renamed".into()));

    assert_eq!(first, second);

    let mut set = HashSet::new();
    set.insert(first);
    assert!(!set.insert(second));
    assert_eq!(set.len(), 1);
}

#[test]
fn registry_replaces_and_releases() {
    let tree = fixtures::sample_whole_disk();
    let mut disks = DiskRegistry::new();

    assert!(disks.insert(build(&tree)).is_none());
    assert_eq!(tree.registry.outstanding_references(), 1);

    // The replaced disk is handed back; dropping it releases its entry
    let replaced = disks.insert(build(&tree));
    assert_eq!(tree.registry.outstanding_references(), 2);
    drop(replaced);
    assert_eq!(tree.registry.outstanding_references(), 1);

    assert!(disks.contains("/dev/disk2"));
    drop(disks.remove("/dev/disk2"));
    assert_eq!(tree.registry.outstanding_references(), 0);
    assert!(disks.is_empty());
}

#[test]
fn registry_selection_by_criteria() {
    let mut disks = DiskRegistry::new();
    disks.insert(build(&fixtures::sample_whole_disk()));
    disks.insert(build(&fixtures::removable_external_disk()));

    let removable = PropertyBag::new().with(description::MEDIA_REMOVABLE, true);
    let ids: Vec<&str> = disks.matching(&removable).map(|disk| disk.id()).collect();
    assert_eq!(ids, vec!["/dev/disk5"]);
    assert_eq!(disks.matching(&PropertyBag::new()).count(), 2);
}
