// SPDX-License-Identifier: GPL-3.0-only

use arbitration_types::UserIdentity;

/// System user database lookup
pub trait IdentityLookup: Send + Sync {
    /// `None` when the uid has no user entry
    fn lookup_user(&self, uid: u32) -> Option<UserIdentity>;
}
