//! Request handlers.
//!
//! Handlers translate HTTP input into calls on `grokmind_core` and map
//! failures via [`AppError`](crate::error::AppError).

pub mod results;
