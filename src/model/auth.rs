use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RegisterDto {
    pub login: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct LoginDto {
    pub login: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct TokenDto {
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ResidentDto {
    pub id: i32,
    pub login: String,
}
