use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ApiResponse,
        event::{CreateEventDto, EventDto, UpdateEventDto},
    },
    server::{
        data::event::EventRepository,
        error::Error,
        model::{app::AppState, auth::CurrentResident},
        service::apartment::ApartmentService,
    },
};

pub static EVENT_TAG: &str = "event";

fn to_dto(event: entity::event::Model) -> EventDto {
    EventDto {
        id: event.id,
        apartment_id: event.apartment_id,
        name: event.name,
        description: event.description,
        starts_at: event.starts_at,
    }
}

/// List an apartment's events
#[utoipa::path(
    get,
    path = "/api/events/apartment/{apartment_id}",
    tag = EVENT_TAG,
    params(("apartment_id" = i32, Path, description = "Apartment id")),
    responses(
        (status = 200, description = "Events for the apartment", body = ApiResponse<Vec<EventDto>>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<Vec<EventDto>>),
        (status = 500, description = "Internal server error", body = ApiResponse<Vec<EventDto>>)
    ),
)]
pub async fn get_events(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(apartment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    ApartmentService::new(&state.db)
        .require_membership(apartment_id, resident.resident_id)
        .await?;

    let events = EventRepository::new(&state.db)
        .get_for_apartment(apartment_id)
        .await?;

    let dtos: Vec<EventDto> = events.into_iter().map(to_dto).collect();

    Ok((StatusCode::OK, Json(ApiResponse::success(dtos))))
}

/// Create an event in an apartment
#[utoipa::path(
    post,
    path = "/api/events/apartment/{apartment_id}",
    tag = EVENT_TAG,
    params(("apartment_id" = i32, Path, description = "Apartment id")),
    request_body = CreateEventDto,
    responses(
        (status = 201, description = "Event created", body = ApiResponse<EventDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<EventDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<EventDto>)
    ),
)]
pub async fn create_event(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(apartment_id): Path<i32>,
    Json(payload): Json<CreateEventDto>,
) -> Result<impl IntoResponse, Error> {
    ApartmentService::new(&state.db)
        .require_membership(apartment_id, resident.resident_id)
        .await?;

    let event = EventRepository::new(&state.db)
        .create(
            apartment_id,
            payload.name,
            payload.description,
            payload.starts_at,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(to_dto(event)))))
}

/// Update an event
///
/// Events cannot move between apartments; a payload naming a different
/// apartment is rejected.
#[utoipa::path(
    put,
    path = "/api/events/{event_id}",
    tag = EVENT_TAG,
    params(("event_id" = i32, Path, description = "Event id")),
    request_body = UpdateEventDto,
    responses(
        (status = 200, description = "Event updated", body = ApiResponse<EventDto>),
        (status = 400, description = "Attempted to move the event", body = ApiResponse<EventDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<EventDto>),
        (status = 404, description = "Event not found", body = ApiResponse<EventDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<EventDto>)
    ),
)]
pub async fn update_event(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(event_id): Path<i32>,
    Json(payload): Json<UpdateEventDto>,
) -> Result<impl IntoResponse, Error> {
    let repo = EventRepository::new(&state.db);

    let event = repo.get(event_id).await?.ok_or(Error::NotFound("event"))?;

    ApartmentService::new(&state.db)
        .require_membership(event.apartment_id, resident.resident_id)
        .await?;

    if let Some(apartment_id) = payload.apartment_id {
        if apartment_id != event.apartment_id {
            return Err(Error::InvalidRequest(
                "events cannot be moved between apartments".to_string(),
            ));
        }
    }

    let updated = repo
        .update(event, payload.name, payload.description, payload.starts_at)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(to_dto(updated)))))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/api/events/{event_id}",
    tag = EVENT_TAG,
    params(("event_id" = i32, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted", body = ApiResponse<EventDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<EventDto>),
        (status = 404, description = "Event not found", body = ApiResponse<EventDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<EventDto>)
    ),
)]
pub async fn delete_event(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(event_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let repo = EventRepository::new(&state.db);

    let event = repo.get(event_id).await?.ok_or(Error::NotFound("event"))?;

    ApartmentService::new(&state.db)
        .require_membership(event.apartment_id, resident.resident_id)
        .await?;

    repo.delete(event.id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::<EventDto>::success_empty())))
}
