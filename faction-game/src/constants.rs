//! Tunables shared across the faction subsystem.

/// Highest favor a faction can accumulate.
pub const MAX_FAVOR: f64 = 35_331.0;
