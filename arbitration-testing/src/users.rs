// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;

use arbitration_contracts::IdentityLookup;
use arbitration_types::UserIdentity;

/// Fixed passwd table
#[derive(Debug, Clone, Default)]
pub struct FakeUsers {
    users: HashMap<u32, UserIdentity>,
}

impl FakeUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, uid: u32, gid: u32) -> Self {
        self.users.insert(uid, UserIdentity { uid, gid });
        self
    }
}

impl IdentityLookup for FakeUsers {
    fn lookup_user(&self, uid: u32) -> Option<UserIdentity> {
        self.users.get(&uid).copied()
    }
}
