// SPDX-License-Identifier: GPL-3.0-only

//! Owner and permission derivation for hardware-backed disks

use std::sync::Arc;

use arbitration_contracts::IdentityLookup;
use arbitration_types::{IdentityPolicy, PropertyValue, Security};

/// Facts gathered about a device that bear on who owns it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnershipFacts {
    /// Media `Removable` flag
    pub removable: Option<bool>,

    /// `true` for internal, `false` for external, absent when unknown
    pub internal: Option<bool>,

    /// `owner-uid` hint found on the device ancestry
    pub owner_uid: Option<PropertyValue>,

    /// `owner-mode` hint found on the device ancestry
    pub owner_mode: Option<PropertyValue>,
}

pub struct OwnershipResolver {
    policy: IdentityPolicy,
    users: Arc<dyn IdentityLookup>,
}

impl OwnershipResolver {
    pub fn new(policy: IdentityPolicy, users: Arc<dyn IdentityLookup>) -> Self {
        Self { policy, users }
    }

    /// Derive the security record from `facts`
    ///
    /// Removable media and external devices each drop the real owner to the
    /// unknown identity. A resolvable owner hint then replaces both the real
    /// and the effective owner, and a mode hint replaces the default mode.
    pub fn resolve(&self, facts: &OwnershipFacts) -> Security {
        let mut security = Security::administrative(&self.policy);

        if facts.removable == Some(true) {
            security.forget_real_owner(&self.policy);
        }

        if facts.internal == Some(false) {
            security.forget_real_owner(&self.policy);
        }

        if let Some(hint) = &facts.owner_uid {
            match hint_to_uid(hint) {
                Some(uid) => match self.users.lookup_user(uid) {
                    Some(user) => security.assign_owner(user),
                    None => tracing::warn!("owner-uid {} has no user entry, ignoring", uid),
                },
                None => tracing::warn!("owner-uid hint {:?} is not a uid, ignoring", hint),
            }
        }

        if let Some(hint) = &facts.owner_mode {
            match hint_to_u32(hint) {
                Some(mode) => security.mode = mode,
                None => tracing::warn!("owner-mode hint {:?} is not a mode, ignoring", hint),
            }
        }

        security
    }
}

/// Negative hints wrap as a C `int` cast to `uid_t` would, so -2 is nobody
fn hint_to_uid(value: &PropertyValue) -> Option<u32> {
    let value = value.as_integer()?;
    match i32::try_from(value) {
        Ok(signed) => Some(signed as u32),
        Err(_) => u32::try_from(value).ok(),
    }
}

fn hint_to_u32(value: &PropertyValue) -> Option<u32> {
    value.as_integer().and_then(|v| u32::try_from(v).ok())
}
