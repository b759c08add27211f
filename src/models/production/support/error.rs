use thiserror::Error;

/// A mathematically invalid operation encountered while solving a stage.
///
/// Every variant carries the name of the quantity involved so the failure can
/// be traced back to the offending configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A logarithm argument was zero or negative.
    #[error("logarithm of non-positive value: {quantity} = {value}")]
    NonPositiveLogArgument { quantity: &'static str, value: f64 },

    /// A divisor evaluated to zero.
    #[error("division by zero: {quantity}")]
    DivisionByZero { quantity: &'static str },

    /// A square root argument was negative.
    #[error("square root of negative discriminant: {quantity} = {value}")]
    NegativeDiscriminant { quantity: &'static str, value: f64 },

    /// A physical quantity left its valid range.
    #[error("non-physical {quantity}: {value}")]
    NonPhysical { quantity: &'static str, value: f64 },

    /// A marching step produced NaN or infinity.
    #[error("non-finite {quantity} at node {node}")]
    NonFinite { quantity: &'static str, node: usize },
}

impl DomainError {
    /// Returns `ln(value)`, rejecting non-positive arguments.
    pub(crate) fn ln(quantity: &'static str, value: f64) -> Result<f64, Self> {
        if value > 0.0 {
            Ok(value.ln())
        } else {
            Err(Self::NonPositiveLogArgument { quantity, value })
        }
    }

    /// Returns `numerator / denominator`, rejecting a zero denominator.
    pub(crate) fn divide(
        quantity: &'static str,
        numerator: f64,
        denominator: f64,
    ) -> Result<f64, Self> {
        if denominator == 0.0 {
            Err(Self::DivisionByZero { quantity })
        } else {
            Ok(numerator / denominator)
        }
    }

    /// Returns `sqrt(value)`, rejecting negative arguments.
    pub(crate) fn sqrt(quantity: &'static str, value: f64) -> Result<f64, Self> {
        if value < 0.0 {
            Err(Self::NegativeDiscriminant { quantity, value })
        } else {
            Ok(value.sqrt())
        }
    }

    /// Passes `value` through if it is finite.
    pub(crate) fn finite(quantity: &'static str, node: usize, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::NonFinite { quantity, node })
        }
    }
}
