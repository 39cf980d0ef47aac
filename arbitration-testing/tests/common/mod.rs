// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use arbitration_disk::{Disk, HardwareDiskBuilder};
use arbitration_testing::{DiskTree, FakeUsers, init_tracing};

pub fn users() -> FakeUsers {
    FakeUsers::new().with_user(501, 20).with_user(0, 0)
}

pub fn builder(tree: &DiskTree) -> HardwareDiskBuilder {
    init_tracing();
    HardwareDiskBuilder::new(tree.provider(), Arc::new(users()))
}

pub fn build(tree: &DiskTree) -> Disk {
    builder(tree)
        .build(tree.media)
        .unwrap_or_else(|e| panic!("construction should succeed: {e}"))
}
