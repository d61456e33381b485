//! Domain layer - Core business entities and rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user record and its DTOs, the validation rule table, and the age
//! calculation.

pub mod age;
pub mod clock;
pub mod constants;
pub mod error;
pub mod user;
pub mod validation;

pub use age::calculate_age;
pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use user::{CreateUserRequest, UpdateUserRequest, UserRecord, UserResponse};
pub use validation::{parse_date, UserInput, Validator};
