// SPDX-License-Identifier: GPL-3.0-only

//! Ownership and permission attributes of a disk

use serde::{Deserialize, Serialize};

use crate::IdentityPolicy;

/// A resolved system user: its uid and primary gid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: u32,
    pub gid: u32,
}

/// Real and effective owner of a disk plus its permission mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    pub real_uid: u32,
    pub real_gid: u32,
    pub effective_uid: u32,
    pub effective_gid: u32,
    pub mode: u32,
}

impl Security {
    /// Administrative identity for both real and effective owner
    pub fn administrative(policy: &IdentityPolicy) -> Self {
        Self {
            real_uid: policy.admin_uid,
            real_gid: policy.admin_gid,
            effective_uid: policy.admin_uid,
            effective_gid: policy.admin_gid,
            mode: policy.default_mode,
        }
    }

    /// Drop the real owner to the unknown identity, leaving effective as is
    pub fn forget_real_owner(&mut self, policy: &IdentityPolicy) {
        self.real_uid = policy.unknown_uid;
        self.real_gid = policy.unknown_gid;
    }

    /// Make `user` both the real and the effective owner
    pub fn assign_owner(&mut self, user: UserIdentity) {
        self.real_uid = user.uid;
        self.real_gid = user.gid;
        self.effective_uid = user.uid;
        self.effective_gid = user.gid;
    }

    pub fn has_unknown_real_owner(&self, policy: &IdentityPolicy) -> bool {
        self.real_uid == policy.unknown_uid && self.real_gid == policy.unknown_gid
    }
}
