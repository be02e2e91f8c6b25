//! Request/response types for the back-office endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::models::{Membership, User, Visit};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CreateProductRequest {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub category: String,
    pub image: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: i64,
    pub category: String,
    pub image: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CoursePayload {
    pub title: String,
    pub description: String,
    pub date: String,
    pub price: i64,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct EventPayload {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub membership: Option<Membership>,
}

/// User listing entry; the password never serializes out of the API.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
    pub membership: Option<Membership>,
    pub visits: Vec<Visit>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            is_admin: user.is_admin,
            membership: user.membership,
            visits: user.visits,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct BlockDateRequest {
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use uuid::Uuid;

    #[test]
    fn user_response_never_carries_the_password() {
        let user = User {
            id: Uuid::new_v4(),
            email: "taller@gorillaz.co".to_string(),
            password: SecretString::from("taller123".to_string()),
            name: "Taller Gorillaz".to_string(),
            is_admin: true,
            membership: None,
            visits: Vec::new(),
        };
        let value = serde_json::to_value(UserResponse::from(user)).expect("response");
        assert!(value.get("password").is_none());
        assert!(!value.to_string().contains("taller123"));
    }

    #[test]
    fn create_user_request_defaults() {
        let json = serde_json::json!({
            "email": "nuevo@gorillaz.co",
            "password": "secreto",
            "name": "Nuevo"
        });
        let request: CreateUserRequest = serde_json::from_value(json).expect("request");
        assert!(!request.is_admin);
        assert!(request.membership.is_none());
    }
}
