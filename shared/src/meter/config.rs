use crate::meter::{direction::ProgressDirection, error::MeterError};

/// Construction-time configuration of a meter. Everything here may also be
/// changed later through the meter's setters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeterConfig {
    /// Ceiling the meter rises to (or falls from)
    pub maximum: i32,
    /// Progress applied per qualifying tick
    pub increment: u32,
    /// Only every `tick_rate`-th host step is a qualifying tick
    pub tick_rate: u32,
    pub direction: ProgressDirection,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            maximum: 0,
            increment: 1,
            tick_rate: 1,
            direction: ProgressDirection::Rising,
        }
    }
}

impl MeterConfig {
    pub fn new(maximum: i32) -> Self {
        Self {
            maximum,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), MeterError> {
        check_maximum(self.maximum)?;
        check_at_least_one("increment", self.increment)?;
        check_at_least_one("tick_rate", self.tick_rate)?;
        Ok(())
    }
}

pub(crate) fn check_maximum(maximum: i32) -> Result<(), MeterError> {
    if maximum < 0 {
        return Err(MeterError::InvalidConfiguration {
            field: "maximum",
            value: i64::from(maximum),
        });
    }
    Ok(())
}

pub(crate) fn check_at_least_one(field: &'static str, value: u32) -> Result<(), MeterError> {
    if value == 0 {
        return Err(MeterError::InvalidConfiguration {
            field,
            value: i64::from(value),
        });
    }
    Ok(())
}
