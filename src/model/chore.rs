use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ChoreDto {
    pub id: i32,
    pub description: String,
}

/// One numbered roster position in a chore's rotation.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct QueueSlotDto {
    pub position: i32,
    pub member_id: i32,
}

/// A chore together with its full rotation state.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ChoreDetailsDto {
    pub id: i32,
    pub description: String,
    pub starts_at: NaiveDateTime,
    pub interval_days: i32,
    /// 1-indexed cursor identifying whose turn it currently is.
    pub current_position: i32,
    pub roster: Vec<QueueSlotDto>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CreateChoreDto {
    pub description: String,
    pub starts_at: NaiveDateTime,
    pub interval_days: i32,
    /// Ordered resident-in-apartment ids; slot 1 is `roster[0]`.
    pub roster: Vec<i32>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct UpdateChoreDto {
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ReplaceRosterDto {
    pub roster: Vec<i32>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct AdvanceCycleDto {
    /// Requested cycle position; mapped onto `[1, roster_size]` modularly.
    pub position: i32,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct AssigneeDto {
    pub member_id: i32,
    pub position: i32,
}
