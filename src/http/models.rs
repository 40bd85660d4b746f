//! Request payloads sent by the probes.
use serde::Serialize;

use crate::args::UserState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'req> {
    pub user_name_or_email: &'req str,
    pub password: &'req str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest<'req> {
    pub name: &'req str,
    pub category_id: u64,
    pub price: u64,
    pub description: &'req str,
}

impl CreateProductRequest<'static> {
    /// Minimal payload that passes validation when authorization succeeds.
    #[must_use]
    pub const fn debug_product() -> Self {
        Self {
            name: "Debug Product",
            category_id: 1,
            price: 100,
            description: "Test",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserStateRequest {
    pub user_state: UserState,
}
