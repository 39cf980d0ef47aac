// SPDX-License-Identifier: GPL-3.0-only

use arbitration_contracts::Plane;
use arbitration_disk::{ConstructionCause, DiskError};
use arbitration_testing::FakeEntry;
use arbitration_testing::fixtures::{self, REQUIRED_MEDIA_KEYS};
use arbitration_types::keys::{class, description, registry};
use arbitration_types::{DeviceNumber, DiskOption, DiskState, PropertyValue, Security};

use crate::common::{build, builder};

#[test]
fn whole_internal_disk_end_to_end() {
    let tree = fixtures::sample_whole_disk();
    let disk = build(&tree);
    let bag = disk.description();

    assert_eq!(disk.id(), "/dev/disk2");
    assert_eq!(disk.device_path(false), Some("/dev/disk2"));
    assert_eq!(disk.device_path(true), Some("/dev/rdisk2"));
    assert_eq!(disk.device_number(), Some(DeviceNumber { major: 1, minor: 8 }));
    assert_eq!(disk.bsd_unit(), Some(2));

    assert_eq!(bag.get_str(description::MEDIA_BSD_NAME), Some("disk2"));
    assert_eq!(bag.get_integer(description::MEDIA_BLOCK_SIZE), Some(512));
    assert_eq!(bag.get_integer(description::MEDIA_SIZE), Some(10_000_000_000));
    assert_eq!(bag.get_bool(description::MEDIA_REMOVABLE), Some(false));
    assert_eq!(bag.get_bool(description::MEDIA_EJECTABLE), Some(false));
    assert_eq!(bag.get_bool(description::MEDIA_LEAF), Some(true));
    assert_eq!(bag.get_bool(description::MEDIA_WHOLE), Some(true));
    assert_eq!(bag.get_bool(description::MEDIA_WRITABLE), Some(true));
    assert_eq!(bag.get_str(description::MEDIA_KIND), Some(class::MEDIA));
    assert!(!bag.contains_key(description::MEDIA_TYPE));
    assert_eq!(bag.get_str(description::MEDIA_NAME), Some("APPLE SSD SM0512F Media"));
    assert_eq!(bag.get_str(description::MEDIA_PATH), Some(tree.media_path().as_str()));
    assert!(bag.get_bag(description::MEDIA_ICON).is_some());
    assert_eq!(bag.get_bool(description::VOLUME_NETWORK), Some(false));

    assert_eq!(bag.get_bool(description::DEVICE_INTERNAL), Some(true));
    assert_eq!(bag.get_str(description::DEVICE_PROTOCOL), Some("SATA"));
    assert_eq!(bag.get_str(description::DEVICE_MODEL), Some("APPLE SSD SM0512F"));
    assert_eq!(bag.get_str(description::DEVICE_VENDOR), Some("APPLE"));
    assert_eq!(bag.get_str(description::DEVICE_REVISION), Some("UXM2JA1Q"));
    assert_eq!(bag.get_integer(description::DEVICE_UNIT), Some(0));
    assert!(bag.get_str(description::DEVICE_PATH).is_some());
    assert!(!bag.contains_key(description::DEVICE_GUID));

    assert_eq!(bag.get_str(description::BUS_NAME), Some("PCI0"));
    assert_eq!(bag.get_str(description::BUS_PATH), Some("IODeviceTree:/PCI0@0"));
    assert!(matches!(
        bag.get(description::APPEARANCE_TIME),
        Some(PropertyValue::Real(seconds)) if *seconds > 0.0
    ));

    let policy = arbitration_types::IdentityPolicy::default();
    assert_eq!(*disk.security(), Security::administrative(&policy));
    assert_eq!(disk.options(), DiskOption::MountAutomatic);
    assert!(!disk.state(DiskState::StagedProbe));
    assert!(disk.states().is_empty());
}

#[test]
fn disk_holds_one_media_reference_for_its_lifetime() {
    let tree = fixtures::sample_whole_disk();
    let disk = build(&tree);

    assert_eq!(tree.registry.references(tree.media), 1);
    assert_eq!(tree.registry.outstanding_references(), 1);
    assert_eq!(disk.device().map(|d| d.entry()), Some(tree.media));

    drop(disk);
    assert_eq!(tree.registry.outstanding_references(), 0);
}

#[test]
fn any_missing_required_fact_fails_without_leaking() {
    for key in REQUIRED_MEDIA_KEYS {
        let tree = fixtures::sample_whole_disk();
        tree.registry.remove_property_everywhere(key);

        let error = builder(&tree)
            .build(tree.media)
            .expect_err("construction must fail");

        match &error {
            DiskError::Construction { path, cause } => {
                assert_eq!(path.as_deref(), Some(tree.media_path().as_str()), "{key}");
                assert!(
                    matches!(cause, ConstructionCause::MissingProperty(k) if k == key),
                    "{key}: {cause:?}"
                );
            }
            other => panic!("{key}: unexpected error {other:?}"),
        }
        assert_eq!(tree.registry.outstanding_references(), 0, "{key} leaked");
    }
}

#[test]
fn missing_block_storage_device_fails() {
    let tree = fixtures::sample_whole_disk();
    let media = tree.registry.insert(
        FakeEntry::new()
            .child_of(tree.controller)
            .class(class::MEDIA)
            .name(Plane::Service, "Orphan Media")
            .path(Plane::Service, "IOService:/orphan")
            .properties(fixtures::media_properties("disk9", false)),
    );

    let error = builder(&tree).build(media).expect_err("no device above media");
    assert_eq!(
        error.construction_cause(),
        Some(&ConstructionCause::MissingBlockStorageDevice)
    );
    assert!(matches!(
        &error,
        DiskError::Construction { path: Some(path), .. } if path == "IOService:/orphan"
    ));
    assert_eq!(tree.registry.outstanding_references(), 0);
}

#[test]
fn failure_without_registry_path_is_anonymous() {
    let tree = fixtures::sample_whole_disk();
    let media = tree.registry.insert(
        FakeEntry::new()
            .child_of(tree.device)
            .class(class::MEDIA)
            .properties(fixtures::media_properties("disk9", false)),
    );
    tree.registry.fail_properties(media);

    let error = builder(&tree).build(media).expect_err("properties fail");
    assert!(matches!(error, DiskError::Construction { path: None, .. }));
    assert!(error.to_string().contains("<anonymous>"));
    assert_eq!(tree.registry.outstanding_references(), 0);
}

#[test]
fn provider_failure_on_device_releases_everything() {
    let tree = fixtures::sample_whole_disk();
    tree.registry.fail_properties(tree.device);

    let error = builder(&tree).build(tree.media).expect_err("device query fails");
    assert!(matches!(
        error.construction_cause(),
        Some(ConstructionCause::Provider(_))
    ));
    assert_eq!(tree.registry.outstanding_references(), 0);
}

#[test]
fn non_integer_device_number_is_invalid() {
    let tree = fixtures::sample_whole_disk();
    tree.registry.set_property(tree.media, registry::BSD_MAJOR, "one");

    let error = builder(&tree).build(tree.media).expect_err("bad major");
    assert!(matches!(
        error.construction_cause(),
        Some(ConstructionCause::InvalidProperty { key, .. }) if *key == registry::BSD_MAJOR
    ));
    assert_eq!(tree.registry.outstanding_references(), 0);
}

#[test]
fn optical_media_require_a_type() {
    let tree = fixtures::sample_whole_disk();
    tree.registry.add_class(tree.media, class::CD_MEDIA);

    let error = builder(&tree).build(tree.media).expect_err("CD without type");
    assert_eq!(
        error.construction_cause(),
        Some(&ConstructionCause::MissingProperty(registry::MEDIA_TYPE))
    );

    tree.registry.set_property(tree.media, registry::MEDIA_TYPE, "CD-ROM");
    let disk = build(&tree);
    assert_eq!(disk.description().get_str(description::MEDIA_KIND), Some(class::CD_MEDIA));
    assert_eq!(disk.description().get_str(description::MEDIA_TYPE), Some("CD-ROM"));
}

#[test]
fn dvd_class_wins_over_cd() {
    let tree = fixtures::sample_whole_disk();
    tree.registry.add_class(tree.media, class::CD_MEDIA);
    tree.registry.add_class(tree.media, class::DVD_MEDIA);
    tree.registry.set_property(tree.media, registry::MEDIA_TYPE, "DVD-R");

    let disk = build(&tree);
    assert_eq!(disk.description().get_str(description::MEDIA_KIND), Some(class::DVD_MEDIA));
}

#[test]
fn guid_is_stored_big_endian() {
    let tree = fixtures::sample_whole_disk();
    tree.registry
        .set_property(tree.controller, registry::GUID, 0x0011_2233_4455_6677_i64);

    let disk = build(&tree);
    let guid = disk
        .description()
        .get(description::DEVICE_GUID)
        .and_then(PropertyValue::as_data)
        .expect("GUID blob");
    assert_eq!(guid, [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77]);
}

#[test]
fn bus_facts_are_optional() {
    let tree = fixtures::sample_whole_disk();
    tree.registry.remove_path(tree.bus, Plane::DeviceTree);

    let disk = build(&tree);
    assert!(!disk.description().contains_key(description::BUS_NAME));
    assert!(!disk.description().contains_key(description::BUS_PATH));
    assert_eq!(tree.registry.references(tree.bus), 0);
}

#[test]
fn media_name_falls_back_to_mac_roman() {
    let tree = fixtures::sample_whole_disk();
    tree.registry.set_name(tree.media, Plane::Service, b"Caf\x8E Media".to_vec());

    let disk = build(&tree);
    assert_eq!(disk.description().get_str(description::MEDIA_NAME), Some("Café Media"));
}

#[test]
fn media_path_prefers_device_tree_plane() {
    let tree = fixtures::sample_whole_disk();
    let media = tree.registry.insert(
        FakeEntry::new()
            .child_of(tree.device)
            .class(class::MEDIA)
            .name(Plane::Service, "Media")
            .path(Plane::Service, "IOService:/media")
            .path(Plane::DeviceTree, "IODeviceTree:/PCI0@0/media")
            .properties(fixtures::media_properties("disk3", false)),
    );

    let disk = crate::common::builder(&tree).build(media).expect("build");
    assert_eq!(
        disk.description().get_str(description::MEDIA_PATH),
        Some("IODeviceTree:/PCI0@0/media")
    );
}

#[test]
fn auto_mount_hint_controls_options() {
    let tree = fixtures::sample_whole_disk();
    tree.registry.set_property(tree.bus, registry::AUTO_MOUNT, false);
    assert!(build(&tree).options().is_empty());

    tree.registry.set_property(tree.bus, registry::AUTO_MOUNT, true);
    assert_eq!(
        build(&tree).options(),
        DiskOption::MountAutomatic | DiskOption::MountAutomaticNoDefer
    );

    tree.registry.set_property(tree.bus, registry::AUTO_MOUNT, "yes");
    assert!(build(&tree).options().is_empty());
}

#[test]
fn eject_upon_logout_hint() {
    let tree = fixtures::sample_whole_disk();
    tree.registry.set_property(tree.device, registry::EJECT_UPON_LOGOUT, false);
    assert!(!build(&tree).option(DiskOption::EjectUponLogout));

    tree.registry.set_property(tree.device, registry::EJECT_UPON_LOGOUT, true);
    let disk = build(&tree);
    assert!(disk.option(DiskOption::EjectUponLogout));
    assert!(disk.option(DiskOption::MountAutomatic));
}

#[test]
fn custom_device_directory() {
    let tree = fixtures::sample_whole_disk();
    let config = arbitration_types::ArbitrationConfig::from_toml_str("device_dir = \"/devices\"")
        .expect("config");
    let builder = arbitration_disk::HardwareDiskBuilder::with_config(
        tree.provider(),
        std::sync::Arc::new(crate::common::users()),
        config,
    );

    let disk = builder.build(tree.media).expect("build");
    assert_eq!(disk.id(), "/devices/disk2");
    assert_eq!(disk.device_path(true), Some("/devices/rdisk2"));
}

fn assert_provider_failure(tree: &fixtures::DiskTree, expected_path: Option<&str>) {
    let error = builder(tree).build(tree.media).expect_err("construction must fail");

    assert!(
        matches!(error.construction_cause(), Some(ConstructionCause::Provider(_))),
        "{error:?}"
    );
    assert!(matches!(
        &error,
        DiskError::Construction { path, .. } if path.as_deref() == expected_path
    ));
    assert_eq!(tree.registry.outstanding_references(), 0);
}

#[test]
fn missing_media_name_fails() {
    let tree = fixtures::sample_whole_disk();
    tree.registry.remove_name(tree.media, Plane::Service);

    assert_provider_failure(&tree, Some(tree.media_path().as_str()));
}

#[test]
fn media_outside_both_planes_fails_anonymously() {
    let tree = fixtures::sample_whole_disk();
    tree.registry.remove_path(tree.media, Plane::Service);
    tree.registry.remove_path(tree.media, Plane::DeviceTree);

    assert_provider_failure(&tree, None);

    let error = builder(&tree).build(tree.media).expect_err("no media path");
    assert!(error.to_string().contains("<anonymous>"));
}

#[test]
fn missing_device_service_path_fails() {
    let tree = fixtures::sample_whole_disk();
    tree.registry.remove_path(tree.device, Plane::Service);

    assert_provider_failure(&tree, Some(tree.media_path().as_str()));
    assert_eq!(tree.registry.references(tree.device), 0);
}

#[test]
fn bus_in_device_tree_without_a_name_fails() {
    let tree = fixtures::sample_whole_disk();
    tree.registry.remove_name(tree.bus, Plane::DeviceTree);

    assert_provider_failure(&tree, Some(tree.media_path().as_str()));
    assert_eq!(tree.registry.references(tree.bus), 0);
}
