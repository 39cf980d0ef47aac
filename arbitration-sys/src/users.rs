// SPDX-License-Identifier: GPL-3.0-only

use arbitration_contracts::IdentityLookup;
use arbitration_types::UserIdentity;
use nix::unistd::{Uid, User};

/// Resolves uids through the system user database (getpwuid_r)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemUsers;

impl IdentityLookup for SystemUsers {
    fn lookup_user(&self, uid: u32) -> Option<UserIdentity> {
        match User::from_uid(Uid::from_raw(uid)) {
            Ok(Some(user)) => Some(UserIdentity {
                uid: user.uid.as_raw(),
                gid: user.gid.as_raw(),
            }),
            Ok(None) => {
                tracing::debug!("No passwd entry for UID {}", uid);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to resolve passwd entry for UID {}: {}", uid, e);
                None
            }
        }
    }
}
