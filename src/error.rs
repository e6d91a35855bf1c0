use simple_error::SimpleError;
use thiserror::Error;

pub type MatchResult<T> = Result<T, MatchError>;

/// Errors raised by the synthesizer and the reflection mapper.
///
/// An impedance pair that cannot be matched by an L-section is not an error;
/// the synthesizer returns an empty solution list for it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("Invalid input: {what} = {value}")]
    Domain { what: &'static str, value: f64 },

    #[error("Chart singularity: {what}")]
    ChartSingularity { what: &'static str },

    #[error("Exponent {exponent} has no SI prefix (expected a multiple of 3 in -18..=9)")]
    ScaleOutOfRange { exponent: i32 },

    #[error("Degenerate circle: {what}")]
    DegenerateCircle { what: &'static str },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl MatchError {
    pub fn is_domain(&self) -> bool {
        matches!(self, MatchError::Domain { .. })
    }
}

impl From<SimpleError> for MatchError {
    fn from(err: SimpleError) -> Self {
        MatchError::Parse(err.as_str().to_string())
    }
}

/// Reject non-finite or non-positive values.
pub(crate) fn require_positive(what: &'static str, value: f64) -> MatchResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MatchError::Domain { what, value })
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("z0", 50.0), Ok(50.0));
        assert!(require_positive("z0", 0.0).unwrap_err().is_domain());
        assert!(require_positive("z0", -1.0).unwrap_err().is_domain());
        assert!(require_positive("z0", f64::NAN).unwrap_err().is_domain());
        assert!(require_positive("z0", f64::INFINITY).unwrap_err().is_domain());
    }

    #[test]
    fn test_display() {
        let err = MatchError::Domain {
            what: "source resistance",
            value: -2.0,
        };
        assert_eq!(err.to_string(), "Invalid input: source resistance = -2");
        let err: MatchError = SimpleError::new("bad complex").into();
        assert_eq!(err, MatchError::Parse("bad complex".to_string()));
    }
}
