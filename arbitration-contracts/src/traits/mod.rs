// SPDX-License-Identifier: GPL-3.0-only

pub mod identity;
pub mod registry;
pub mod volume;

pub use identity::IdentityLookup;
pub use registry::{Ancestor, DeviceRegistry, EntryId, Plane};
pub use volume::{MountStat, MountedVolumeProvider};
