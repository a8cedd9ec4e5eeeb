//! Age derivation from a date of birth.

use chrono::{Datelike, NaiveDate};

/// Minimum age a user must have at the time of any write.
pub const MINIMUM_AGE: i32 = 18;

/// Returns the age in whole years of someone born on `date_of_birth` as of `today`.
///
/// The year difference is reduced by one while the birthday has not yet
/// occurred in `today`'s year. A date of birth after `today` yields a
/// negative value.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - date_of_birth.year();

    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years - 1
    } else {
        years
    }
}

/// Whether someone born on `date_of_birth` meets [`MINIMUM_AGE`] as of `today`.
pub fn is_adult(date_of_birth: NaiveDate, today: NaiveDate) -> bool {
    age_on(date_of_birth, today) >= MINIMUM_AGE
}
