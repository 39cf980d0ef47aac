// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use arbitration_contracts::{MountStat, MountedVolumeProvider, ProviderError};

/// Fixed mount table keyed by exact mount point
#[derive(Debug, Clone, Default)]
pub struct FakeMounts {
    mounts: HashMap<PathBuf, Result<MountStat, ProviderError>>,
}

impl FakeMounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mount(
        mut self,
        mount_point: &str,
        mounted_from: &str,
        owner_uid: u32,
        is_local: bool,
    ) -> Self {
        let stat = MountStat {
            mount_point: mount_point.to_string(),
            mounted_from: mounted_from.to_string(),
            fs_type: if is_local { "ext4" } else { "nfs4" }.to_string(),
            owner_uid,
            is_local,
        };
        self.mounts.insert(PathBuf::from(mount_point), Ok(stat));
        self
    }

    /// Make `stat_mount(path)` fail with `error`
    pub fn with_error(mut self, path: &str, error: ProviderError) -> Self {
        self.mounts.insert(PathBuf::from(path), Err(error));
        self
    }
}

impl MountedVolumeProvider for FakeMounts {
    fn stat_mount(&self, path: &Path) -> Result<MountStat, ProviderError> {
        match self.mounts.get(path) {
            Some(result) => result.clone(),
            None => Err(ProviderError::not_found(format!(
                "{} is not a mount point",
                path.display()
            ))),
        }
    }
}
