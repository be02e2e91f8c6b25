//! Back-office CRUD, gated on the session user's admin flag.
//!
//! Unauthenticated callers get 401; authenticated non-admins get 404 so
//! the admin surface is not enumerable.

pub mod appointments;
pub mod availability;
pub mod courses;
pub mod events;
pub mod products;
pub mod types;
pub mod users;
