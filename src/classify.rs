//! Folds raw backend outcomes into three-valued results: error, nothing, success.
//!
//! A raw outcome is `Err(_)` when the backend reported an error, `Ok(None)` when it
//! answered without a payload, and `Ok(Some(rows))` otherwise.

use crate::auth::ProviderUser;
use crate::model::UserRow;
use std::fmt::Display;

/// Result of a backend call as seen by the HTTP layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Error,
    Nothing,
    Success(T),
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Error => Outcome::Error,
            Outcome::Nothing => Outcome::Nothing,
            Outcome::Success(v) => Outcome::Success(f(v)),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Raw row-returning backend outcome.
pub type RawRows<T, E> = Result<Option<Vec<T>>, E>;

/// Read or update expected to touch at most one row. Zero rows is `Nothing`,
/// more than one is an integrity violation.
pub fn classify_one<T, E: Display>(op: &str, raw: RawRows<T, E>) -> Outcome<T> {
    classify_single(op, raw, false)
}

/// Insert expected to return exactly the created row. A silent empty insert is an error.
pub fn classify_insert<T, E: Display>(op: &str, raw: RawRows<T, E>) -> Outcome<T> {
    classify_single(op, raw, true)
}

fn classify_single<T, E: Display>(op: &str, raw: RawRows<T, E>, empty_is_error: bool) -> Outcome<T> {
    let rows = match raw {
        Err(e) => {
            tracing::warn!(op, error = %e, "backend reported error");
            return Outcome::Error;
        }
        Ok(None) => {
            tracing::warn!(op, "backend returned null data");
            return Outcome::Error;
        }
        Ok(Some(rows)) => rows,
    };
    match rows.len() {
        0 if empty_is_error => {
            tracing::warn!(op, "write returned zero rows");
            Outcome::Error
        }
        0 => {
            tracing::debug!(op, "zero rows");
            Outcome::Nothing
        }
        1 => {
            tracing::debug!(op, "found one row");
            rows.into_iter().next().map_or(Outcome::Error, Outcome::Success)
        }
        n => {
            tracing::warn!(op, count = n, "unexpected row count");
            Outcome::Error
        }
    }
}

/// Call without returned rows (plain delete, ping): the driver cannot tell a missing
/// key from a removed one, so only the error flag matters.
pub fn classify_ack<E: Display>(op: &str, raw: Result<(), E>) -> Outcome<()> {
    match raw {
        Err(e) => {
            tracing::warn!(op, error = %e, "backend reported error");
            Outcome::Error
        }
        Ok(()) => Outcome::Success(()),
    }
}

/// List endpoint: every row is kept; an empty list is `Nothing`.
pub fn classify_list<T, E: Display>(op: &str, raw: RawRows<T, E>) -> Outcome<Vec<T>> {
    match raw {
        Err(e) => {
            tracing::warn!(op, error = %e, "backend reported error");
            Outcome::Error
        }
        Ok(None) => {
            tracing::warn!(op, "backend returned null data");
            Outcome::Error
        }
        Ok(Some(rows)) if rows.is_empty() => {
            tracing::debug!(op, "zero rows");
            Outcome::Nothing
        }
        Ok(Some(rows)) => {
            tracing::debug!(op, count = rows.len(), "found rows");
            Outcome::Success(rows)
        }
    }
}

/// Auth service call yielding a user. A user without an email is unusable.
pub fn classify_user<E: Display>(op: &str, raw: Result<Option<ProviderUser>, E>) -> Outcome<UserRow> {
    let user = match raw {
        Err(e) => {
            tracing::warn!(op, error = %e, "auth service reported error");
            return Outcome::Error;
        }
        Ok(None) => {
            tracing::debug!(op, "no user");
            return Outcome::Error;
        }
        Ok(Some(user)) => user,
    };
    match user.email {
        Some(email) if !email.is_empty() => Outcome::Success(UserRow { email, id: user.id }),
        _ => {
            tracing::warn!(op, id = %user.id, "user has no email");
            Outcome::Error
        }
    }
}
