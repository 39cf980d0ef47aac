// SPDX-License-Identifier: GPL-3.0-only

//! Canonical encoding of a description
//!
//! The encoded form is what clients receive over the arbitration protocol.
//! Bag keys are sorted, so two equal bags always encode to the same bytes.

use thiserror::Error;

use crate::{PropertyBag, PropertyValue};

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("failed to encode description: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode description: {0}")]
    Decode(#[source] serde_json::Error),

    /// JSON has no NaN or infinity, so such a value cannot round-trip
    #[error("description value {key} is not a finite real")]
    NonFiniteReal { key: String },
}

pub fn encode(description: &PropertyBag) -> Result<Vec<u8>, EncodingError> {
    check_finite(description)?;
    serde_json::to_vec(description).map_err(EncodingError::Encode)
}

/// Reject non-finite reals anywhere in the bag, nested bags included
fn check_finite(bag: &PropertyBag) -> Result<(), EncodingError> {
    for (key, value) in bag.iter() {
        match value {
            PropertyValue::Real(real) if !real.is_finite() => {
                return Err(EncodingError::NonFiniteReal { key: key.clone() });
            }
            PropertyValue::Bag(nested) => check_finite(nested)?,
            _ => {}
        }
    }
    Ok(())
}

pub fn decode(bytes: &[u8]) -> Result<PropertyBag, EncodingError> {
    serde_json::from_slice(bytes).map_err(EncodingError::Decode)
}
