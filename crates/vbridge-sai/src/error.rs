//! SAI-style status codes and structured errors.
//!
//! The facade never panics across its boundary: configuration mistakes come
//! back as a [`SaiError`], and [`SaiError::status`] recovers the wire-level
//! status code a vendor API would have returned.

use std::fmt;
use thiserror::Error;

/// Status codes returned across the management API boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaiStatus {
    Success = 0,
    Failure = -1,
    NotSupported = -2,
    InvalidParameter = -5,
    Uninitialized = -12,
    MandatoryAttributeMissing = -14,
}

impl SaiStatus {
    /// Creates a status from a raw i32 value.
    pub fn from_raw(status: i32) -> Self {
        match status {
            0 => SaiStatus::Success,
            -2 => SaiStatus::NotSupported,
            -5 => SaiStatus::InvalidParameter,
            -12 => SaiStatus::Uninitialized,
            -14 => SaiStatus::MandatoryAttributeMissing,
            _ => SaiStatus::Failure,
        }
    }

    /// Returns true if the status indicates success.
    pub fn is_success(&self) -> bool {
        *self == SaiStatus::Success
    }
}

impl fmt::Display for SaiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SaiStatus::Success => "SAI_STATUS_SUCCESS",
            SaiStatus::Failure => "SAI_STATUS_FAILURE",
            SaiStatus::NotSupported => "SAI_STATUS_NOT_SUPPORTED",
            SaiStatus::InvalidParameter => "SAI_STATUS_INVALID_PARAMETER",
            SaiStatus::Uninitialized => "SAI_STATUS_UNINITIALIZED",
            SaiStatus::MandatoryAttributeMissing => "SAI_STATUS_MANDATORY_ATTRIBUTE_MISSING",
        };
        write!(f, "{}", s)
    }
}

/// Error type for facade operations.
#[derive(Debug, Clone, Error)]
pub enum SaiError {
    /// A mandatory attribute was absent from the attribute list.
    #[error("mandatory attribute missing: {attribute}")]
    MandatoryAttributeMissing { attribute: &'static str },

    /// Invalid parameter passed across the API boundary.
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// The object already exists and cannot be created again.
    #[error("already exists: {item}")]
    AlreadyExists { item: &'static str },

    /// The call requires a switch, but none has been created yet.
    #[error("switch not created")]
    Uninitialized,

    /// The requested API family is not implemented.
    #[error("not supported: {feature}")]
    NotSupported { feature: String },
}

impl SaiError {
    /// Creates an invalid parameter error with a message.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        SaiError::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates a not supported error with a feature description.
    pub fn not_supported(feature: impl Into<String>) -> Self {
        SaiError::NotSupported {
            feature: feature.into(),
        }
    }

    /// Returns the status code this error maps to at the API boundary.
    pub fn status(&self) -> SaiStatus {
        match self {
            SaiError::MandatoryAttributeMissing { .. } => SaiStatus::MandatoryAttributeMissing,
            SaiError::InvalidParameter { .. } => SaiStatus::InvalidParameter,
            SaiError::AlreadyExists { .. } => SaiStatus::Failure,
            SaiError::Uninitialized => SaiStatus::Uninitialized,
            SaiError::NotSupported { .. } => SaiStatus::NotSupported,
        }
    }
}

/// Result type for facade operations.
pub type SaiResult<T> = Result<T, SaiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_raw() {
        assert_eq!(SaiStatus::from_raw(0), SaiStatus::Success);
        assert_eq!(SaiStatus::from_raw(-12), SaiStatus::Uninitialized);
        assert_eq!(SaiStatus::from_raw(-14), SaiStatus::MandatoryAttributeMissing);
        assert_eq!(SaiStatus::from_raw(-999), SaiStatus::Failure);
    }

    #[test]
    fn test_status_success() {
        assert!(SaiStatus::Success.is_success());
        assert!(!SaiStatus::Failure.is_success());
    }

    #[test]
    fn test_error_to_status() {
        let err = SaiError::MandatoryAttributeMissing { attribute: "vlan_id" };
        assert_eq!(err.status(), SaiStatus::MandatoryAttributeMissing);

        let err = SaiError::not_supported("FDB API");
        assert_eq!(err.status(), SaiStatus::NotSupported);

        let err = SaiError::AlreadyExists { item: "switch" };
        assert_eq!(err.status(), SaiStatus::Failure);

        assert_eq!(SaiError::Uninitialized.status(), SaiStatus::Uninitialized);
    }

    #[test]
    fn test_error_display() {
        let err = SaiError::MandatoryAttributeMissing { attribute: "vlan_id" };
        assert_eq!(err.to_string(), "mandatory attribute missing: vlan_id");
    }
}
