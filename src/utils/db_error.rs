//! Classification of database errors raised by user writes.

/// Unique index on `LOWER(email)`.
const EMAIL_CONSTRAINT: &str = "users_email_lower_key";
/// Primary key of the `users` table.
const ID_CONSTRAINT: &str = "users_pkey";

pub fn is_unique_violation_on_email(e: &sqlx::Error) -> bool {
    is_unique_violation_on(e, EMAIL_CONSTRAINT)
}

pub fn is_unique_violation_on_id(e: &sqlx::Error) -> bool {
    is_unique_violation_on(e, ID_CONSTRAINT)
}

fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}
