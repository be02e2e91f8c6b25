pub mod admin;
pub mod cart;
pub mod catalog;
pub mod club;
pub mod content;
pub mod health;
pub mod root;

// common validation helpers for the handlers
use regex::Regex;

/// Normalize an email for lookup/uniqueness checks.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
pub(crate) fn valid_email(email_normalized: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email_normalized))
}

/// Dates travel as strings everywhere; only the shape is checked.
pub(crate) fn valid_date(date: &str) -> bool {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").is_ok_and(|regex| regex.is_match(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email(" Miembro@Gorillaz.CO "), "miembro@gorillaz.co");
    }

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("miembro@gorillaz.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing-at.example.com"));
        assert!(!valid_email("missing-domain@"));
    }

    #[test]
    fn valid_date_checks_shape_only() {
        assert!(valid_date("2026-06-01"));
        assert!(!valid_date("2026-6-1"));
        assert!(!valid_date("01-06-2026"));
        assert!(!valid_date("mañana"));
        // shape only; the calendar is not consulted
        assert!(valid_date("2026-99-99"));
    }
}
