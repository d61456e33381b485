//! Age calculation from a date of birth.

use chrono::{Datelike, NaiveDate};

/// Whole years elapsed between `date_of_birth` and `today`.
///
/// The year difference is reduced by one while this year's month/day
/// anniversary has not been reached yet. A February 29 birthday is simply
/// compared by month and day, so in non-leap years it counts from March 1.
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - date_of_birth.year();

    if today.month() < date_of_birth.month()
        || (today.month() == date_of_birth.month() && today.day() < date_of_birth.day())
    {
        years -= 1;
    }

    years
}
