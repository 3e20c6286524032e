use serde::Deserialize;
use utoipa::ToSchema;

use crate::entity::users::UserRole;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    #[serde(default)]
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub is_superuser: bool,
}

/// Role is fixed at signup and cannot be changed here.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}
