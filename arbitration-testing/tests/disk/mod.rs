// SPDX-License-Identifier: GPL-3.0-only

mod construction;
mod identity;
mod ownership;
