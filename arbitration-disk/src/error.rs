// SPDX-License-Identifier: GPL-3.0-only

use arbitration_contracts::ProviderError;
use arbitration_types::EncodingError;
use thiserror::Error;

/// Reason a hardware-backed disk could not be assembled
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionCause {
    #[error("required property {0:?} is missing")]
    MissingProperty(&'static str),

    #[error("property {key:?} is not {expected}")]
    InvalidProperty {
        key: &'static str,
        expected: &'static str,
    },

    #[error("no block storage device above the media")]
    MissingBlockStorageDevice,

    #[error("registry query failed: {0}")]
    Provider(#[from] ProviderError),
}

#[derive(Error, Debug)]
pub enum DiskError {
    #[error("unable to create disk, path = {}: {cause}", path.as_deref().unwrap_or("<anonymous>"))]
    Construction {
        path: Option<String>,
        cause: ConstructionCause,
    },

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl DiskError {
    pub fn construction_cause(&self) -> Option<&ConstructionCause> {
        match self {
            Self::Construction { cause, .. } => Some(cause),
            Self::Encoding(_) => None,
        }
    }
}
