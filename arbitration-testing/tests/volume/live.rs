// SPDX-License-Identifier: GPL-3.0-only

use std::io::Write;
use std::os::unix::fs::MetadataExt;
use std::sync::Arc;

use arbitration_contracts::IdentityLookup;
use arbitration_disk::MountedVolumeBuilder;
use arbitration_sys::{LocalMounts, SystemUsers};
use arbitration_types::keys::description;

#[test]
fn builds_from_mount_table_file() {
    let dir = tempfile::tempdir().expect("mount dir");
    let point = dir.path().canonicalize().expect("canonical dir");

    let mut mountinfo = tempfile::NamedTempFile::new().expect("mountinfo");
    writeln!(mountinfo, "36 25 8:2 / / rw,relatime - ext4 /dev/sda2 rw").expect("write");
    writeln!(
        mountinfo,
        "91 36 8:17 / {} rw,nosuid - vfat /dev/sdb1 rw",
        point.display()
    )
    .expect("write");

    let builder = MountedVolumeBuilder::new(
        Arc::new(LocalMounts::with_mountinfo_path(mountinfo.path())),
        Arc::new(SystemUsers),
    );

    let disk = builder.build(dir.path()).expect("listed mount point");

    assert_eq!(disk.id(), point.to_string_lossy());
    assert_eq!(disk.description().get_bool(description::VOLUME_NETWORK), Some(false));

    // Owners without a passwd entry leave the administrative default
    let owner = std::fs::metadata(&point).expect("metadata").uid();
    let expected = SystemUsers.lookup_user(owner).map_or(0, |user| user.uid);
    assert_eq!(disk.user_ruid(), expected);

    assert!(builder.build(&dir.path().join("missing")).is_none());
}
