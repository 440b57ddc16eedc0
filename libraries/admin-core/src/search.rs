//! Local search over the cached user list.
//!
//! Recomputed on every keystroke, so it stays a pure borrow of the list.

use crate::types::User;

/// Narrow `users` to those matching `query`.
///
/// A user matches when `query` is a case-sensitive substring of the first
/// name, last name, status, address, or decimal age. An empty query matches
/// everyone. Results keep the input order.
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    if query.is_empty() {
        return users.iter().collect();
    }

    users
        .iter()
        .filter(|user| matches_query(user, query))
        .collect()
}

/// Whether a single user matches `query` on any searchable field
pub fn matches_query(user: &User, query: &str) -> bool {
    user.first_name.contains(query)
        || user.last_name.contains(query)
        || user.status.as_str().contains(query)
        || user.address.contains(query)
        || user.age.to_string().contains(query)
}
