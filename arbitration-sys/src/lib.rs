// SPDX-License-Identifier: GPL-3.0-only

//! Live system providers for disk arbitration
//!
//! This crate answers the questions the arbitration core asks the host:
//! - which filesystem is mounted on a path, who owns it, and whether it is
//!   local (`mounts`, `volumes`)
//! - which uid/gid a user id resolves to (`users`)
//!
//! The device registry has no portable implementation and is not provided
//! here.

pub mod error;
pub mod mounts;
pub mod users;
pub mod volumes;

pub use error::{Result, SysError};
pub use mounts::{MountEntry, is_network_fs_type, parse_mountinfo};
pub use users::SystemUsers;
pub use volumes::LocalMounts;
