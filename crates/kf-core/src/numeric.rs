use crate::KfError;

/// Floating point type used throughout the system.
pub type Real = f64;

/// Absolute/relative tolerance pair.
///
/// The default matches the integration tolerances used by reaction-model
/// screening.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-8,
            rel: 1e-4,
        }
    }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, KfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(KfError::NonFinite { what, value: v })
    }
}

/// Sum in slice order. Flux totals go through here so that repeated
/// screening of the same state is bit-for-bit reproducible.
pub fn ordered_sum(values: impl IntoIterator<Item = Real>) -> Real {
    values.into_iter().fold(0.0, |acc, v| acc + v)
}
