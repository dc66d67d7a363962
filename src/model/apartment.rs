use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApartmentDto {
    pub id: i32,
    pub name: String,
    /// 6-character join code, immutable after creation.
    pub access_code: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CreateApartmentDto {
    pub name: String,
}

/// Update payload; `access_code` is accepted only so that attempts to change
/// it can be rejected explicitly rather than silently ignored.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct UpdateApartmentDto {
    pub name: Option<String>,
    pub access_code: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct JoinApartmentDto {
    pub access_code: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MemberDto {
    /// Resident-in-apartment identifier; this is what chore queue slots reference.
    pub member_id: i32,
    pub resident_id: i32,
    pub login: String,
}
