use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::status::string_enum;

string_enum! {
    /// Role of a portal user
    UserRole {
        Admin => "ADMIN",
        User => "USER",
    }
}

string_enum! {
    /// Coarse entitlement category granting visibility of accounts a user does not own
    ModelTag {
        Dillion => "Dillion",
        Katie => "katie",
        Premium => "Premium",
        Basic => "Basic",
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub role: UserRole,
    /// Model tags derived from the user's email and role
    pub models: Vec<ModelTag>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserDto {
    pub email: String,
    pub password: String,
    #[serde(default = "CreateUserDto::default_role")]
    pub role: UserRole,
}

impl CreateUserDto {
    fn default_role() -> UserRole {
        UserRole::User
    }
}
