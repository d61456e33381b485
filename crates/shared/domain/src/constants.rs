//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum name length, in Unicode code points
pub const MIN_NAME_LENGTH: usize = 1;

/// Maximum name length, in Unicode code points
pub const MAX_NAME_LENGTH: usize = 255;

/// `chrono` format string for calendar dates (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Exact textual shape a date of birth must have before it is parsed
pub const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

/// Separator used when several violation messages are reported together
pub const VIOLATION_SEPARATOR: &str = "; ";

// =============================================================================
// Field names (as they appear in violation messages)
// =============================================================================

pub const FIELD_NAME: &str = "name";

pub const FIELD_DATE_OF_BIRTH: &str = "dateOfBirth";
