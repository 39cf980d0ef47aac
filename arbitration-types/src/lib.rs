// SPDX-License-Identifier: GPL-3.0-only

//! Canonical domain types for the disk arbitration daemon
//!
//! This crate defines the vocabulary every other arbitration crate speaks:
//!
//! - **arbitration-contracts**: provider traits return and accept these types
//! - **arbitration-disk**: assembles a `PropertyBag` description per disk
//! - **clients**: receive the canonical encoding of a description
//!
//! ## Description model
//!
//! A disk is described by a `PropertyBag`, an ordered map from string keys to
//! typed `PropertyValue`s. The well-known keys live in [`keys::description`];
//! raw registry keys consulted while building a description live in
//! [`keys::registry`].

pub mod config;
pub mod disk;
pub mod encoding;
pub mod flags;
pub mod id;
pub mod keys;
pub mod property;
pub mod security;

pub use config::{ArbitrationConfig, ConfigError, IdentityPolicy};
pub use disk::{DeviceNumber, FilesystemBinding, MediaKind};
pub use encoding::{EncodingError, decode, encode};
pub use flags::{DiskOption, DiskState, staged_states};
pub use id::CallbackId;
pub use property::{PropertyBag, PropertyValue};
pub use security::{Security, UserIdentity};
