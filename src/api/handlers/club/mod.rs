//! Club membership area: login, session inspection, member panel and
//! visit history. All of it hangs off the session cookie.

pub mod login;
pub mod panel;
pub mod session;
pub mod types;
