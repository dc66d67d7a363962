use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct EventDto {
    pub id: i32,
    pub apartment_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CreateEventDto {
    pub name: String,
    pub description: Option<String>,
    pub starts_at: NaiveDateTime,
}

/// Update payload; `apartment_id` is accepted only so that attempts to move an
/// event between apartments can be rejected explicitly.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct UpdateEventDto {
    pub apartment_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<NaiveDateTime>,
}
