//! Grok's Mind domain core.
//!
//! Pure, synchronous building blocks shared by the HTTP service: the result
//! identifier codec, the deterministic persona assigner, locale resolution,
//! the static trivia/style catalog, and share-link construction. Nothing in
//! this crate performs I/O apart from reading the clock in
//! [`result_id::encode`].

pub mod assigner;
pub mod catalog;
pub mod error;
pub mod hashing;
pub mod locale;
pub mod numeric;
pub mod persona;
pub mod result_id;
pub mod share;
pub mod types;
