//! Authentication module for Pluma.
//!
//! Password hashing lives here; session storage is in [`crate::db`].

mod password;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
