// SPDX-License-Identifier: GPL-3.0-only

use std::path::Path;

use crate::ProviderError;

/// Statistics of a live mount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountStat {
    /// Directory the filesystem is mounted on
    pub mount_point: String,

    /// Mount source (device node, remote export, pseudo name)
    pub mounted_from: String,

    /// Filesystem type name
    pub fs_type: String,

    /// User that owns the mount
    pub owner_uid: u32,

    /// False for network filesystems
    pub is_local: bool,
}

pub trait MountedVolumeProvider: Send + Sync {
    /// Statistics of the mount whose mount point is `path`.
    ///
    /// Returns a `NotFound` error when `path` is not a mount point.
    fn stat_mount(&self, path: &Path) -> Result<MountStat, ProviderError>;
}
