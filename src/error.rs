//! Error types for ring construction.
//!
//! Only configuration can be invalid. Once a ring has been built, every tick
//! and pause toggle is a total operation and cannot fail.

use thiserror::Error;

/// Errors raised while configuring a countdown session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RingError {
    /// The session target was zero or negative.
    ///
    /// A countdown needs at least one tick; percentages are undefined for a
    /// zero target, so no fallback value is substituted.
    #[error("invalid configuration: target must be positive, got {target}")]
    InvalidConfiguration {
        /// The rejected target value.
        target: i64,
    },

    /// A custom size carried a height that cannot be drawn.
    #[error("invalid configuration: custom height must be a positive finite number, got {height}")]
    InvalidHeight {
        /// The rejected height, in points.
        height: f64,
    },
}

/// Convenience alias used by fallible constructors in this crate.
pub type Result<T> = std::result::Result<T, RingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_message() {
        let err = RingError::InvalidConfiguration { target: -3 };
        assert_eq!(
            err.to_string(),
            "invalid configuration: target must be positive, got -3"
        );
    }

    #[test]
    fn test_invalid_height_message() {
        let err = RingError::InvalidHeight { height: 0.0 };
        assert!(err.to_string().contains("custom height"));
    }
}
