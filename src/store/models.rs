//! Persisted collection records.
//!
//! These are the shapes written to the flat JSON files. API request and
//! response types live next to their handlers; only the records that hit
//! disk are defined here.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub slug: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Price in Colombian pesos, whole units.
    pub price: i64,
    pub category: String,
    pub image: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub price: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    pub id: String,
    pub name: String,
    pub date: String,
    /// Free text, exactly what the customer typed.
    pub service: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Membership {
    pub level: String,
    pub since: String,
    pub expires: String,
    pub benefits: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Visit {
    pub date: String,
    pub service: String,
}

/// A club member or back-office user.
///
/// The password is compared in plaintext but wrapped in [`SecretString`]
/// so `Debug` output and traces never carry it. It still serializes into
/// the users file, which doubles as the credential store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub membership: Option<Membership>,
    #[serde(default)]
    pub visits: Vec<Visit>,
}

fn serialize_secret<S: Serializer>(value: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.expose_secret())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_debug_redacts_password() {
        let user = User {
            id: Uuid::nil(),
            email: "miembro@gorillaz.co".to_string(),
            password: "gorillaz123".to_string().into(),
            name: "Miembro del Club".to_string(),
            is_admin: false,
            membership: None,
            visits: Vec::new(),
        };
        let rendered = format!("{user:?}");
        assert!(!rendered.contains("gorillaz123"));
    }

    #[test]
    fn user_round_trips_through_json() {
        let json = serde_json::json!({
            "id": "7f8c4a8e-54d2-4f36-93a2-5a4c1f6f0a10",
            "email": "miembro@gorillaz.co",
            "password": "gorillaz123",
            "name": "Miembro del Club",
            "membership": {
                "level": "Premium",
                "since": "2024-06-01",
                "expires": "2026-06-01",
                "benefits": ["Descuento 15% en mecánica rápida"]
            },
            "visits": [{"date": "2025-02-15", "service": "Cambio de aceite"}]
        });
        let user: User = serde_json::from_value(json).expect("user should parse");
        assert!(!user.is_admin, "missing flag defaults to false");
        assert_eq!(user.visits.len(), 1);

        let value = serde_json::to_value(&user).expect("user should serialize");
        assert_eq!(
            value.get("password").and_then(serde_json::Value::as_str),
            Some("gorillaz123"),
            "password must persist to the users file"
        );
    }
}
