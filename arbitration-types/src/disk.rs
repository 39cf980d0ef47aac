// SPDX-License-Identifier: GPL-3.0-only

//! Disk-level value types shared between the builders and the daemon

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keys::class;

/// Major/minor pair of a block device special file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceNumber {
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for DeviceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.major, self.minor)
    }
}

/// Media classification derived from registry class conformance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Dvd,
    Cd,
    Generic,
}

impl MediaKind {
    /// Registry class name recorded in the description
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Dvd => class::DVD_MEDIA,
            Self::Cd => class::CD_MEDIA,
            Self::Generic => class::MEDIA,
        }
    }

    /// Optical media carry a type property that must be present
    pub fn has_media_type(self) -> bool {
        !matches!(self, Self::Generic)
    }
}

/// Filesystem handler recognised for a disk
///
/// Set by the probe collaborator once a filesystem type is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesystemBinding {
    /// Filesystem type name (e.g., "hfs", "msdos")
    pub kind: String,

    /// Location of the handler bundle, if it has one
    pub handler_path: Option<String>,
}

impl FilesystemBinding {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            handler_path: None,
        }
    }
}
