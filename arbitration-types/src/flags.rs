// SPDX-License-Identifier: GPL-3.0-only

//! Disk lifecycle state and policy option flags
//!
//! State and options are separate flag types, so a state bit can never be
//! set or cleared through the options set and vice versa.

use enumflags2::{BitFlags, bitflags};

/// Transient lifecycle flags, set and cleared explicitly by the daemon and
/// by stage-execution collaborators
#[bitflags]
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiskState {
    CommandActive = 1 << 0,
    RequireRepair = 1 << 1,
    RequireRepairQuotas = 1 << 2,
    StagedAppear = 1 << 3,
    StagedProbe = 1 << 4,
    StagedPeek = 1 << 5,
    StagedRepair = 1 << 6,
    StagedApprove = 1 << 7,
    StagedAuthorize = 1 << 8,
    StagedMount = 1 << 9,
    Zombie = 1 << 10,
}

/// Policy toggles derived at construction, adjustable by the daemon
#[bitflags]
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiskOption {
    EjectUponLogout = 1 << 0,
    MountAutomatic = 1 << 1,
    MountAutomaticNoDefer = 1 << 2,
    Private = 1 << 3,
}

/// Staging flags from probe through mount
pub fn staged_states() -> BitFlags<DiskState> {
    DiskState::StagedProbe
        | DiskState::StagedPeek
        | DiskState::StagedRepair
        | DiskState::StagedApprove
        | DiskState::StagedAuthorize
        | DiskState::StagedMount
}
