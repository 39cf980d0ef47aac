// SPDX-License-Identifier: GPL-3.0-only

use std::path::Path;
use std::sync::Arc;

use arbitration_contracts::{ProviderError, ProviderErrorKind};
use arbitration_disk::MountedVolumeBuilder;
use arbitration_testing::{FakeMounts, FakeUsers, init_tracing};
use arbitration_types::keys::description;
use arbitration_types::{DiskState, staged_states};

fn builder(mounts: FakeMounts) -> MountedVolumeBuilder {
    init_tracing();
    MountedVolumeBuilder::new(Arc::new(mounts), Arc::new(FakeUsers::new().with_user(501, 20)))
}

#[test]
fn network_volume_is_fully_staged() {
    let builder = builder(FakeMounts::new().with_mount("/Volumes/share", "nas:/share", 501, false));

    let disk = builder.build(Path::new("/Volumes/share")).expect("mounted");

    assert_eq!(disk.id(), "/Volumes/share");
    assert_eq!(disk.description().get_bool(description::VOLUME_NETWORK), Some(true));
    assert_eq!(disk.description().get_str(description::VOLUME_PATH), Some("/Volumes/share"));
    assert!(disk.states().contains(staged_states()));
    assert!(!disk.state(DiskState::Zombie));
    assert!(disk.device_path(false).is_none());
    assert!(disk.bsd_unit().is_none());
    assert_eq!(disk.user_ruid(), 501);
}

#[test]
fn not_mounted_is_none_not_error() {
    let builder = builder(FakeMounts::new());
    assert!(builder.build(Path::new("/Volumes/gone")).is_none());
}

#[test]
fn provider_failure_is_none() {
    let builder = builder(FakeMounts::new().with_error(
        "/Volumes/locked",
        ProviderError::new(ProviderErrorKind::PermissionDenied, "statfs denied"),
    ));
    assert!(builder.build(Path::new("/Volumes/locked")).is_none());
}

#[test]
fn volume_summary_line_reports_mount_path() {
    let builder = builder(FakeMounts::new().with_mount("/Volumes/CARD", "/dev/disk5s1", 501, true));
    let mut disk = builder.build(Path::new("/Volumes/CARD")).expect("mounted");

    assert_eq!(disk.summary_line(), None);

    disk.set_description(description::MEDIA_BSD_NAME, Some("disk5s1".into()));
    let line = disk.summary_line().expect("summary");
    assert!(line.starts_with("disk5s1 "));
    assert!(line.ends_with(" /Volumes/CARD"));
    disk.log();
}
