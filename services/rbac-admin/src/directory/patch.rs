//! Partial-update policy and shared field rules.
//!
//! Edits follow a merge-on-falsy policy: a field that is absent, an empty
//! string, or an empty id set means "keep the stored value". Whitespace is
//! content, not emptiness. The request types
//! keep "absent" and "empty" distinct (`Option<T>`); this module is the one
//! place where both collapse into "unchanged".
//!
//! A consequence: a role's permission set or a user's role set can never be
//! cleared to empty through an edit.
use crate::directory::error::{DirectoryError, DirectoryResult};
use std::collections::HashSet;
use std::hash::Hash;

/// Values the partial-update policy treats as "not supplied".
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// The update value, if it counts as supplied under merge-on-falsy.
pub fn supplied<T: Blank>(update: Option<T>) -> Option<T> {
    update.filter(|value| !value.is_blank())
}

/// Merge one field: a supplied update wins, anything else keeps `current`.
pub fn merge<T: Blank>(current: T, update: Option<T>) -> T {
    supplied(update).unwrap_or(current)
}

/// Reject an empty required field.
pub fn require(field: &str, value: String) -> DirectoryResult<String> {
    if value.is_blank() {
        return Err(DirectoryError::Validation(format!("{field} is required")));
    }
    Ok(value)
}

/// Emails are compared and stored lowercase.
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

/// Drop repeated ids, keeping first-seen order.
pub fn dedup<T: Copy + Eq + Hash>(ids: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
