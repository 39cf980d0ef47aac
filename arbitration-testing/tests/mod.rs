// SPDX-License-Identifier: GPL-3.0-only

mod common;
mod disk;
mod volume;
