// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use arbitration_contracts::{MountStat, MountedVolumeProvider, ProviderError};

use crate::error::{Result, SysError};
use crate::mounts::{MountEntry, parse_mountinfo};

const MOUNTINFO_PATH: &str = "/proc/self/mountinfo";

/// Mounted-volume provider backed by the kernel mount table
///
/// Mountinfo records no per-mount owner, so every mount stacked on a point
/// shares the directory owner and there is no owner to prefer among them.
/// The last entry for the point, the visible one, is reported.
#[derive(Debug, Clone)]
pub struct LocalMounts {
    mountinfo: PathBuf,
}

impl Default for LocalMounts {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalMounts {
    pub fn new() -> Self {
        Self::with_mountinfo_path(MOUNTINFO_PATH)
    }

    /// Read the mount table from another file (tests, chroots)
    pub fn with_mountinfo_path(path: impl Into<PathBuf>) -> Self {
        Self {
            mountinfo: path.into(),
        }
    }

    pub fn entries(&self) -> Result<Vec<MountEntry>> {
        let mount_info = fs::read_to_string(&self.mountinfo)?;
        parse_mountinfo(&mount_info)
    }

    fn stat(&self, path: &Path) -> Result<MountStat> {
        let canonical = path.canonicalize()?;
        let mount_point = canonical
            .to_str()
            .ok_or_else(|| SysError::InvalidPath(canonical.display().to_string()))?
            .to_string();

        let entry = self
            .entries()?
            .into_iter()
            .rfind(|entry| entry.mount_point == mount_point)
            .ok_or_else(|| SysError::NotMounted(mount_point.clone()))?;

        let owner_uid = fs::metadata(&canonical)?.uid();
        let is_local = entry.is_local();

        tracing::debug!(
            "{} is mounted from {} ({}), owner {}",
            mount_point,
            entry.source,
            entry.fs_type,
            owner_uid
        );

        Ok(MountStat {
            mount_point,
            mounted_from: entry.source,
            fs_type: entry.fs_type,
            owner_uid,
            is_local,
        })
    }
}

impl MountedVolumeProvider for LocalMounts {
    fn stat_mount(&self, path: &Path) -> std::result::Result<MountStat, ProviderError> {
        self.stat(path).map_err(ProviderError::from)
    }
}
