//! Money values compared and averaged across scorers, never summed across
//! currencies — hence `BigDecimal` rather than a plain float, mirroring
//! the teacher's `sqlx::types::BigDecimal` usage for salary-shaped fields.

use bigdecimal::BigDecimal;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub BigDecimal);

impl Money {
    pub fn from_i64(value: i64) -> Self {
        Money(BigDecimal::from(value))
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl FromStr for Money {
    type Err = bigdecimal::ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Money(BigDecimal::from_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_f64() {
        let m = Money::from_i64(65_000);
        assert!((m.to_f64() - 65_000.0).abs() < 1e-6);
    }
}
