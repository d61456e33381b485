//! User domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::age::calculate_age;

/// Persisted user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Assigned by the persistence layer, never changed afterwards
    pub id: i32,
    pub name: String,
    pub date_of_birth: NaiveDate,
}

impl UserRecord {
    pub fn new(id: i32, name: String, date_of_birth: NaiveDate) -> Self {
        Self {
            id,
            name,
            date_of_birth,
        }
    }

    /// Age in whole years as of `today`
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        calculate_age(self.date_of_birth, today)
    }
}

/// User creation data transfer object
///
/// Missing fields decode as empty strings so that validation, not the JSON
/// decoder, reports them.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateUserRequest {
    /// Display name, 1 to 255 characters
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "John Doe"))]
    pub name: String,
    /// Date of birth, `YYYY-MM-DD`
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "1990-01-15"))]
    pub dob: String,
}

/// User update data transfer object
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateUserRequest {
    /// New display name, 1 to 255 characters
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "Jane Doe"))]
    pub name: String,
    /// New date of birth, `YYYY-MM-DD`
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "1992-03-04"))]
    pub dob: String,
}

/// User response, with the age derived at construction time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: i32,
    /// User display name
    pub name: String,
    /// Date of birth
    #[serde(rename = "dob")]
    pub date_of_birth: NaiveDate,
    /// Age in whole years
    pub age: i32,
}

impl UserResponse {
    /// Build a response from a stored record, computing the age as of `today`.
    pub fn from_record(record: UserRecord, today: NaiveDate) -> Self {
        let age = record.age_on(today);
        Self {
            id: record.id,
            name: record.name,
            date_of_birth: record.date_of_birth,
            age,
        }
    }
}
