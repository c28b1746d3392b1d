//! Validation errors for value types
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Address parsing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AddressError {
    #[error("Address must start with 0x: {input}")]
    MissingPrefix { input: String },

    #[error("Address must be 20 bytes, got {length}")]
    InvalidLength { length: usize },

    #[error("Address is not valid hex: {input}")]
    InvalidHex { input: String },
}

/// Conversion path errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Conversion path needs at least 2 assets, got {length}")]
    TooShort { length: usize },

    #[error("Conversion path must start with the native currency, got {first}")]
    MustStartWithNative { first: String },

    #[error("Conversion path must end with a token asset, not the native currency")]
    NativeTarget,
}

/// Conversion rate errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateError {
    #[error("Minimum conversion rate must be at least 1, got {rate}")]
    BelowOne { rate: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_error_display() {
        let err = PathError::TooShort { length: 1 };
        assert_eq!(
            err.to_string(),
            "Conversion path needs at least 2 assets, got 1"
        );
    }

    #[test]
    fn test_rate_error_display() {
        let err = RateError::BelowOne {
            rate: "0.5".to_string(),
        };
        assert!(err.to_string().contains("0.5"));
    }
}
