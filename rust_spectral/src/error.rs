//! Error type shared by the DFT and CWT modules

/// Errors raised on invalid input.
///
/// Every variant is a precondition violation detected at the call that
/// received the bad value; nothing is deferred to a later stage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpectralError {
    #[error("Signal must contain at least one sample")]
    EmptySignal,

    #[error("Non-finite sample at index {index}")]
    NonFiniteSample { index: usize },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Unknown mode: {0}")]
    UnknownMode(String),
}

impl SpectralError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpectralError>;

/// Reject non-positive or non-finite values.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(SpectralError::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(SpectralError::invalid(name, value, "must be > 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("k", 2.0).is_ok());
        assert!(matches!(
            ensure_positive("k", 0.0),
            Err(SpectralError::InvalidParameter { name: "k", .. })
        ));
        assert!(ensure_positive("k", -1.0).is_err());
        assert!(ensure_positive("k", f64::NAN).is_err());
        assert!(ensure_positive("k", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = SpectralError::invalid("fs", -1.0, "must be > 0");
        assert_eq!(err.to_string(), "Invalid parameter: fs = -1 (must be > 0)");
    }
}
