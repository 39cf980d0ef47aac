// SPDX-License-Identifier: GPL-3.0-only

pub mod protocol;
pub mod traits;

pub use protocol::{ProviderError, ProviderErrorKind};
pub use traits::{
    Ancestor, DeviceRegistry, EntryId, IdentityLookup, MountStat, MountedVolumeProvider, Plane,
};
