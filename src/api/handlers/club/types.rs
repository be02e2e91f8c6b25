//! Request/response types for the club endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::models::{Membership, Visit};

use super::session::Principal;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub is_admin: bool,
}

impl From<Principal> for SessionResponse {
    fn from(principal: Principal) -> Self {
        Self {
            user_id: principal.user_id.to_string(),
            email: principal.email,
            name: principal.name,
            is_admin: principal.is_admin,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PanelResponse {
    pub name: String,
    pub email: String,
    pub membership: Option<Membership>,
    pub visits: Vec<Visit>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VisitRequest {
    pub date: String,
    pub service: String,
}
