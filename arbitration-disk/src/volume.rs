// SPDX-License-Identifier: GPL-3.0-only

//! Disk construction from a mounted volume path

use std::path::Path;
use std::sync::Arc;

use arbitration_contracts::{IdentityLookup, MountedVolumeProvider};
use arbitration_types::keys::description;
use arbitration_types::{IdentityPolicy, staged_states};

use crate::disk::Disk;

/// Builds disks for volumes that are already mounted
pub struct MountedVolumeBuilder {
    mounts: Arc<dyn MountedVolumeProvider>,
    users: Arc<dyn IdentityLookup>,
    policy: IdentityPolicy,
}

impl MountedVolumeBuilder {
    pub fn new(mounts: Arc<dyn MountedVolumeProvider>, users: Arc<dyn IdentityLookup>) -> Self {
        Self::with_policy(mounts, users, IdentityPolicy::default())
    }

    pub fn with_policy(
        mounts: Arc<dyn MountedVolumeProvider>,
        users: Arc<dyn IdentityLookup>,
        policy: IdentityPolicy,
    ) -> Self {
        Self {
            mounts,
            users,
            policy,
        }
    }

    /// Disk for the mount at `path`, or `None` when nothing is mounted there
    pub fn build(&self, path: &Path) -> Option<Disk> {
        let stat = match self.mounts.stat_mount(path) {
            Ok(stat) => stat,
            Err(e) if e.is_not_found() => {
                tracing::debug!("{} is not a mount point", path.display());
                return None;
            }
            Err(e) => {
                tracing::warn!("Unable to stat mount at {}: {}", path.display(), e);
                return None;
            }
        };

        if stat.mount_point.is_empty() {
            tracing::debug!("{} resolved to an empty mount point", path.display());
            return None;
        }

        let mut disk = Disk::new(stat.mount_point, &self.policy);
        disk.set_bypath(Some(path.to_path_buf()));

        disk.update_description(|bag| {
            bag.insert(description::VOLUME_PATH, path.to_string_lossy().into_owned());
            bag.insert(description::VOLUME_MOUNTABLE, true);
            bag.insert(description::VOLUME_NETWORK, !stat.is_local);
        });

        // Already mounted, so registry-driven staging is behind it.
        disk.set_state(staged_states(), true);

        match self.users.lookup_user(stat.owner_uid) {
            Some(user) => disk.security_mut().assign_owner(user),
            None => tracing::debug!(
                "Owner {} of {} is unknown, keeping administrative owner",
                stat.owner_uid,
                disk.id()
            ),
        }

        Some(disk)
    }
}
