//! Application-wide constants.

/// Accepted order lifecycle states, in the order they normally occur.
pub const ORDER_STATUSES: &[&str] = &["pending", "confirmed", "shipped", "delivered", "cancelled"];

/// Accepted appointment lifecycle states.
pub const APPOINTMENT_STATUSES: &[&str] = &["pending", "confirmed", "completed", "cancelled"];

/// Accepted values for the brushing-frequency profile field. Anything else is
/// silently ignored on update rather than rejected.
pub const BRUSHING_FREQUENCIES: &[&str] = &["Once daily", "Twice daily", "Occasionally", "Rarely"];
