use thiserror::Error;

/// Errors that can occur while configuring a meter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeterError {
    /// A configuration value would make ticking or ETA projection ill-defined
    #[error("Invalid meter configuration: `{field}` cannot be {value} (increment and tick_rate must be at least 1, maximum must not be negative)")]
    InvalidConfiguration { field: &'static str, value: i64 },
}
