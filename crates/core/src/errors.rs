//! # Core Error Types
//!
//! Error taxonomy for the fee engine. Uncalibrated pools are not errors:
//! missing depth or prices fall back to a zero signal so the engine decides
//! "no override" instead of failing the trade.

use thiserror::Error;

/// Errors the engine and its math can produce
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurgeCoreError {
    // ========================================================================
    // Math Errors
    // ========================================================================

    #[error("Math overflow")]
    MathOverflow,

    #[error("Math underflow")]
    MathUnderflow,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Mul div overflow")]
    MulDivOverflow,

    #[error("Conversion error")]
    ConversionError,

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Tick out of range")]
    TickOutOfRange,

    #[error("Invalid parameter")]
    InvalidParameter,

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized caller")]
    UnauthorizedCaller,
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, SurgeCoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", SurgeCoreError::UnauthorizedCaller),
            "Unauthorized caller"
        );
        assert_eq!(
            format!("{}", SurgeCoreError::TickOutOfRange),
            "Tick out of range"
        );
    }
}
