use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ApiResponse,
        chore::{
            AdvanceCycleDto, AssigneeDto, ChoreDetailsDto, ChoreDto, CreateChoreDto,
            QueueSlotDto, ReplaceRosterDto, UpdateChoreDto,
        },
    },
    server::{
        data::{chore::TaskRepository, membership::MembershipRepository},
        error::Error,
        model::{app::AppState, auth::CurrentResident},
        service::{
            apartment::ApartmentService,
            rotation::{ChoreState, RotationService},
        },
    },
};

pub static CHORE_TAG: &str = "chore";

fn to_details(state: ChoreState) -> ChoreDetailsDto {
    ChoreDetailsDto {
        id: state.task.id,
        description: state.task.description,
        starts_at: state.allocation.starts_at,
        interval_days: state.allocation.interval_days,
        current_position: state.allocation.current_position,
        roster: state
            .slots
            .into_iter()
            .map(|slot| QueueSlotDto {
                position: slot.position,
                member_id: slot.member_id,
            })
            .collect(),
    }
}

/// Checks that every roster entry is a member of the given apartment.
async fn validate_roster(
    state: &AppState,
    apartment_id: i32,
    roster: &[i32],
) -> Result<(), Error> {
    let members = MembershipRepository::new(&state.db)
        .members(apartment_id)
        .await?;

    for member_id in roster {
        if !members.iter().any(|m| m.member_id == *member_id) {
            return Err(Error::InvalidRequest(format!(
                "member {} does not belong to apartment {}",
                member_id, apartment_id
            )));
        }
    }

    Ok(())
}

/// Resolves the apartment a chore belongs to through its roster and checks
/// that the caller is a member of it.
async fn require_chore_access(
    state: &AppState,
    resident: CurrentResident,
    chore: &ChoreState,
) -> Result<(), Error> {
    // Every slot of a rotation points into the same apartment, so the first
    // one is enough to resolve it.
    let slot = chore.slots.first().ok_or(Error::NotFound("chore roster"))?;

    let member = MembershipRepository::new(&state.db)
        .get(slot.member_id)
        .await?
        .ok_or(Error::NotFound("apartment member"))?;

    ApartmentService::new(&state.db)
        .require_membership(member.apartment_id, resident.resident_id)
        .await?;

    Ok(())
}

/// List an apartment's chores
#[utoipa::path(
    get,
    path = "/api/chores/apartment/{apartment_id}",
    tag = CHORE_TAG,
    params(("apartment_id" = i32, Path, description = "Apartment id")),
    responses(
        (status = 200, description = "Chores rotating among the apartment's members", body = ApiResponse<Vec<ChoreDto>>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<Vec<ChoreDto>>),
        (status = 500, description = "Internal server error", body = ApiResponse<Vec<ChoreDto>>)
    ),
)]
pub async fn get_chores(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(apartment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    ApartmentService::new(&state.db)
        .require_membership(apartment_id, resident.resident_id)
        .await?;

    let tasks = TaskRepository::new(&state.db)
        .get_for_apartment(apartment_id)
        .await?;

    let dtos: Vec<ChoreDto> = tasks
        .into_iter()
        .map(|task| ChoreDto {
            id: task.id,
            description: task.description,
        })
        .collect();

    Ok((StatusCode::OK, Json(ApiResponse::success(dtos))))
}

/// Create a chore with its rotation
///
/// The roster lists resident-in-apartment ids in turn order; slot 1 is the
/// first entry and the cycle starts there.
#[utoipa::path(
    post,
    path = "/api/chores/apartment/{apartment_id}",
    tag = CHORE_TAG,
    params(("apartment_id" = i32, Path, description = "Apartment id")),
    request_body = CreateChoreDto,
    responses(
        (status = 201, description = "Chore created", body = ApiResponse<ChoreDetailsDto>),
        (status = 400, description = "Empty roster or outside member", body = ApiResponse<ChoreDetailsDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<ChoreDetailsDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ChoreDetailsDto>)
    ),
)]
pub async fn create_chore(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(apartment_id): Path<i32>,
    Json(payload): Json<CreateChoreDto>,
) -> Result<impl IntoResponse, Error> {
    ApartmentService::new(&state.db)
        .require_membership(apartment_id, resident.resident_id)
        .await?;
    validate_roster(&state, apartment_id, &payload.roster).await?;

    let chore = RotationService::new(&state.db)
        .create_task(
            payload.description,
            payload.starts_at,
            payload.interval_days,
            &payload.roster,
        )
        .await?;

    tracing::info!(task_id = chore.task.id, apartment_id, "created chore");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(to_details(chore))),
    ))
}

/// Get a chore with its full rotation state
#[utoipa::path(
    get,
    path = "/api/chores/{task_id}",
    tag = CHORE_TAG,
    params(("task_id" = i32, Path, description = "Chore id")),
    responses(
        (status = 200, description = "Chore details", body = ApiResponse<ChoreDetailsDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<ChoreDetailsDto>),
        (status = 404, description = "Chore not found", body = ApiResponse<ChoreDetailsDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ChoreDetailsDto>)
    ),
)]
pub async fn get_chore(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(task_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let chore = RotationService::new(&state.db).get_state(task_id).await?;
    require_chore_access(&state, resident, &chore).await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(to_details(chore)))))
}

/// Update a chore's description
#[utoipa::path(
    put,
    path = "/api/chores/{task_id}",
    tag = CHORE_TAG,
    params(("task_id" = i32, Path, description = "Chore id")),
    request_body = UpdateChoreDto,
    responses(
        (status = 200, description = "Chore updated", body = ApiResponse<ChoreDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<ChoreDto>),
        (status = 404, description = "Chore not found", body = ApiResponse<ChoreDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ChoreDto>)
    ),
)]
pub async fn update_chore(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(task_id): Path<i32>,
    Json(payload): Json<UpdateChoreDto>,
) -> Result<impl IntoResponse, Error> {
    let service = RotationService::new(&state.db);

    let chore = service.get_state(task_id).await?;
    require_chore_access(&state, resident, &chore).await?;

    let task = service
        .update_description(task_id, payload.description)
        .await?;

    let dto = ChoreDto {
        id: task.id,
        description: task.description,
    };

    Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
}

/// Delete a chore and its rotation
#[utoipa::path(
    delete,
    path = "/api/chores/{task_id}",
    tag = CHORE_TAG,
    params(("task_id" = i32, Path, description = "Chore id")),
    responses(
        (status = 200, description = "Chore deleted", body = ApiResponse<ChoreDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<ChoreDto>),
        (status = 404, description = "Chore not found", body = ApiResponse<ChoreDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ChoreDto>)
    ),
)]
pub async fn delete_chore(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(task_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let service = RotationService::new(&state.db);

    let chore = service.get_state(task_id).await?;
    require_chore_access(&state, resident, &chore).await?;

    service.delete_task(task_id).await?;

    tracing::info!(task_id, "deleted chore");

    Ok((StatusCode::OK, Json(ApiResponse::<ChoreDto>::success_empty())))
}

/// Replace a chore's roster
///
/// The cycle position survives the edit, clamped into the new roster's range.
#[utoipa::path(
    put,
    path = "/api/chores/{task_id}/roster",
    tag = CHORE_TAG,
    params(("task_id" = i32, Path, description = "Chore id")),
    request_body = ReplaceRosterDto,
    responses(
        (status = 200, description = "Roster replaced", body = ApiResponse<ChoreDetailsDto>),
        (status = 400, description = "Empty roster or outside member", body = ApiResponse<ChoreDetailsDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<ChoreDetailsDto>),
        (status = 404, description = "Chore not found", body = ApiResponse<ChoreDetailsDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ChoreDetailsDto>)
    ),
)]
pub async fn replace_roster(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(task_id): Path<i32>,
    Json(payload): Json<ReplaceRosterDto>,
) -> Result<impl IntoResponse, Error> {
    let service = RotationService::new(&state.db);

    let chore = service.get_state(task_id).await?;
    require_chore_access(&state, resident, &chore).await?;

    // The new roster must stay within the chore's apartment
    if let Some(slot) = chore.slots.first() {
        let member = MembershipRepository::new(&state.db)
            .get(slot.member_id)
            .await?
            .ok_or(Error::NotFound("apartment member"))?;
        validate_roster(&state, member.apartment_id, &payload.roster).await?;
    }

    let updated = service.replace_roster(task_id, &payload.roster).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(to_details(updated))),
    ))
}

/// Advance a chore's cycle
///
/// The requested position is mapped modularly onto the roster, so any
/// integer is accepted and the cursor always lands on a real slot.
#[utoipa::path(
    post,
    path = "/api/chores/{task_id}/advance",
    tag = CHORE_TAG,
    params(("task_id" = i32, Path, description = "Chore id")),
    request_body = AdvanceCycleDto,
    responses(
        (status = 200, description = "Cycle advanced; the new assignee", body = ApiResponse<AssigneeDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<AssigneeDto>),
        (status = 404, description = "Chore not found", body = ApiResponse<AssigneeDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<AssigneeDto>)
    ),
)]
pub async fn advance_cycle(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(task_id): Path<i32>,
    Json(payload): Json<AdvanceCycleDto>,
) -> Result<impl IntoResponse, Error> {
    let service = RotationService::new(&state.db);

    let chore = service.get_state(task_id).await?;
    require_chore_access(&state, resident, &chore).await?;

    let position = service.advance_cycle(task_id, payload.position).await?;
    let assignee = service.current_assignee(task_id).await?;

    let dto = AssigneeDto {
        member_id: assignee.member_id,
        position,
    };

    Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
}

/// Get the member whose turn it currently is
#[utoipa::path(
    get,
    path = "/api/chores/{task_id}/assignee",
    tag = CHORE_TAG,
    params(("task_id" = i32, Path, description = "Chore id")),
    responses(
        (status = 200, description = "Current assignee", body = ApiResponse<AssigneeDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<AssigneeDto>),
        (status = 404, description = "Chore not found", body = ApiResponse<AssigneeDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<AssigneeDto>)
    ),
)]
pub async fn current_assignee(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(task_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let service = RotationService::new(&state.db);

    let chore = service.get_state(task_id).await?;
    require_chore_access(&state, resident, &chore).await?;

    let assignee = service.current_assignee(task_id).await?;

    let dto = AssigneeDto {
        member_id: assignee.member_id,
        position: assignee.position,
    };

    Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
}
