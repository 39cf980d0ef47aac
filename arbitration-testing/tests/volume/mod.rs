// SPDX-License-Identifier: GPL-3.0-only

mod builder;
mod live;
