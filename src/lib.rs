//! # Motoclub (shop storefront & club API)
//!
//! `motoclub` is the backend for a small motorcycle shop: a public parts
//! catalog, a session-backed shopping cart with a mock checkout, the
//! "club" loyalty area for members, and a back-office for managing
//! products, courses, events, appointments and users.
//!
//! ## Storage Model
//!
//! There is no database. Every collection is held in process memory and
//! persisted as a flat JSON file under the configured data directory.
//! Mutations rewrite the whole collection file; there are no transactions
//! and no cross-process locking. Sessions (and the carts they carry) live
//! only in memory and are gone on restart.
//!
//! ## Authentication
//!
//! Login is a plaintext email/password comparison against the users
//! collection. Successful logins bind the user to a cookie-backed session
//! with a fixed TTL. Back-office routes additionally require the session
//! user's admin flag; non-admin callers get `404 Not Found` rather than
//! `403 Forbidden` so the admin surface is not enumerable.

pub mod api;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
