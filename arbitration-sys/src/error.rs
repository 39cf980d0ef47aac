// SPDX-License-Identifier: GPL-3.0-only

use arbitration_contracts::{ProviderError, ProviderErrorKind};
use thiserror::Error;

/// Error types for system-level queries
#[derive(Error, Debug)]
pub enum SysError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid mountinfo line: {0}")]
    InvalidMountInfoLine(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("not a mount point: {0}")]
    NotMounted(String),
}

impl From<SysError> for ProviderError {
    fn from(err: SysError) -> Self {
        match err {
            SysError::Io(error) => ProviderError::from(error),
            SysError::InvalidPath(msg) => {
                ProviderError::new(ProviderErrorKind::Unsupported, format!("invalid path: {msg}"))
            }
            SysError::NotMounted(msg) => ProviderError::not_found(format!("not mounted: {msg}")),
            SysError::InvalidMountInfoLine(line) => ProviderError::new(
                ProviderErrorKind::Internal,
                format!("invalid mountinfo line: {line}"),
            ),
        }
    }
}

/// Result type alias for system queries
pub type Result<T> = std::result::Result<T, SysError>;
