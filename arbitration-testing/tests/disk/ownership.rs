// SPDX-License-Identifier: GPL-3.0-only

use arbitration_testing::fixtures;
use arbitration_types::IdentityPolicy;
use arbitration_types::keys::{description, registry};

use crate::common::build;

#[test]
fn removable_media_has_unknown_real_owner() {
    let tree = fixtures::disk_tree(
        fixtures::media_properties("disk4", true),
        registry::LOCATION_INTERNAL,
        "SATA",
    );
    let disk = build(&tree);
    let policy = IdentityPolicy::default();

    assert_eq!((disk.user_ruid(), disk.user_rgid()), (99, 99));
    assert_eq!((disk.user_euid(), disk.user_egid()), (policy.admin_uid, policy.admin_gid));
    assert_eq!(disk.mode(), 0o755);
}

#[test]
fn removable_without_location_has_unknown_real_owner() {
    let tree = fixtures::disk_tree(fixtures::media_properties("disk4", true), "Virtual", "File");
    let disk = build(&tree);

    assert!(!disk.description().contains_key(description::DEVICE_INTERNAL));
    assert_eq!((disk.user_ruid(), disk.user_rgid()), (99, 99));
}

#[test]
fn external_fixed_media_has_unknown_real_owner() {
    let tree = fixtures::disk_tree(
        fixtures::media_properties("disk6", false),
        registry::LOCATION_EXTERNAL,
        "USB",
    );
    let disk = build(&tree);

    assert_eq!(disk.description().get_bool(description::DEVICE_INTERNAL), Some(false));
    assert_eq!((disk.user_ruid(), disk.user_rgid()), (99, 99));
}

#[test]
fn internal_fixed_media_keeps_administrative_owner() {
    let disk = build(&fixtures::sample_whole_disk());
    assert_eq!((disk.user_ruid(), disk.user_rgid()), (0, 80));
    assert_eq!((disk.user_euid(), disk.user_egid()), (0, 80));
}

#[test]
fn owner_hint_overrides_removable_and_external() {
    let tree = fixtures::removable_external_disk();
    tree.registry.set_property(tree.controller, registry::OWNER_UID, 501);
    tree.registry.set_property(tree.device, registry::OWNER_MODE, 0o700);

    let disk = build(&tree);

    assert_eq!((disk.user_ruid(), disk.user_rgid()), (501, 20));
    assert_eq!((disk.user_euid(), disk.user_egid()), (501, 20));
    assert_eq!(disk.mode(), 0o700);
}

#[test]
fn owner_hint_on_media_only_is_not_consulted() {
    let tree = fixtures::removable_external_disk();
    tree.registry.set_property(tree.media, registry::OWNER_UID, 501);

    let disk = build(&tree);
    assert_eq!((disk.user_ruid(), disk.user_rgid()), (99, 99));
}

#[test]
fn unknown_owner_hint_keeps_downgrade() {
    let tree = fixtures::removable_external_disk();
    tree.registry.set_property(tree.device, registry::OWNER_UID, 777);

    let disk = build(&tree);
    assert_eq!((disk.user_ruid(), disk.user_rgid()), (99, 99));
    assert_eq!((disk.user_euid(), disk.user_egid()), (0, 80));
}
