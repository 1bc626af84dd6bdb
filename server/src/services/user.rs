//! Session identifier generation.
//!
//! Identifiers are short random strings over a URL-safe alphabet. They are
//! not registered anywhere: a session only exists in the view store after
//! its first successful publish.

use location::{User, UserId};
use rand::Rng;

/// URL-safe alphabet; no character collides with path syntax.
const ID_ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_-";

/// 64^10 possible identifiers.
pub const ID_LEN: usize = 10;

/// Generate a fresh random identifier.
#[must_use]
pub fn generate_id() -> UserId {
    let mut rng = rand::rng();
    let id: String = (0..ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect();
    UserId::from(id)
}

/// Create a new user. Does not touch the view store.
#[must_use]
pub fn create_user() -> User {
    User { id: generate_id() }
}

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;
