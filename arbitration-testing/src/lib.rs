// SPDX-License-Identifier: GPL-3.0-only

//! Test doubles for the arbitration providers
//!
//! [`FakeRegistry`] models a device registry tree and counts every retain and
//! release, so tests can assert that a failed construction leaves no
//! reference behind. [`FakeMounts`] and [`FakeUsers`] stand in for the mount
//! table and the passwd database.

pub mod fixtures;
pub mod logging;
pub mod mounts;
pub mod registry;
pub mod users;

pub use fixtures::DiskTree;
pub use logging::init_tracing;
pub use mounts::FakeMounts;
pub use registry::{FakeEntry, FakeRegistry};
pub use users::FakeUsers;
