// SPDX-License-Identifier: GPL-3.0-only

//! Disk identity and description synthesis
//!
//! Turns raw facts about storage into [`Disk`] records the arbitration daemon
//! tracks through probe, repair, approval and mount:
//!
//! - [`HardwareDiskBuilder`] assembles a disk from a block-storage media
//!   registry entry, failing with [`DiskError::Construction`] when a required
//!   fact is missing
//! - [`MountedVolumeBuilder`] describes an already mounted volume, or yields
//!   `None` when the path is not a mount point
//! - [`OwnershipResolver`] derives owner and permission mode from device facts
//! - [`matches`] evaluates selection criteria against a disk
//! - [`DiskRegistry`] holds disks keyed by id
//!
//! Builders block on their providers and must not be called while holding a
//! broader lock.

pub mod disk;
pub mod error;
pub mod handle;
pub mod hardware;
pub mod identity;
pub mod matcher;
pub mod ownership;
pub mod text;
pub mod volume;

pub use disk::Disk;
pub use error::{ConstructionCause, DiskError};
pub use handle::DeviceHandle;
pub use hardware::HardwareDiskBuilder;
pub use identity::{DiskKey, DiskRegistry};
pub use matcher::matches;
pub use ownership::{OwnershipFacts, OwnershipResolver};
pub use volume::MountedVolumeBuilder;

pub use arbitration_types;
