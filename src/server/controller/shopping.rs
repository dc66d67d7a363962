use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ApiResponse,
        shopping::{AddShoppingItemDto, ProductDto, ShoppingItemDto, UpdateShoppingItemDto},
    },
    server::{
        data::shopping::{ProductRepository, ShoppingItemRepository},
        error::Error,
        model::{app::AppState, auth::CurrentResident},
        service::{apartment::ApartmentService, shopping::ShoppingService},
    },
};

pub static SHOPPING_TAG: &str = "shopping";

/// List the product catalog
///
/// Entries appear when a shopping list first names a product and disappear
/// with the last line referencing them.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = SHOPPING_TAG,
    responses(
        (status = 200, description = "Every product currently referenced by a list", body = ApiResponse<Vec<ProductDto>>),
        (status = 401, description = "Missing or invalid token", body = ApiResponse<Vec<ProductDto>>),
        (status = 500, description = "Internal server error", body = ApiResponse<Vec<ProductDto>>)
    ),
)]
pub async fn get_products(
    State(state): State<AppState>,
    _resident: CurrentResident,
) -> Result<impl IntoResponse, Error> {
    let products = ProductRepository::new(&state.db).get_all().await?;

    let dtos: Vec<ProductDto> = products
        .into_iter()
        .map(|p| ProductDto {
            id: p.id,
            name: p.name,
        })
        .collect();

    Ok((StatusCode::OK, Json(ApiResponse::success(dtos))))
}

/// Get an apartment's shopping list
#[utoipa::path(
    get,
    path = "/api/shopping/apartment/{apartment_id}",
    tag = SHOPPING_TAG,
    params(("apartment_id" = i32, Path, description = "Apartment id")),
    responses(
        (status = 200, description = "Shopping list with product names resolved", body = ApiResponse<Vec<ShoppingItemDto>>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<Vec<ShoppingItemDto>>),
        (status = 500, description = "Internal server error", body = ApiResponse<Vec<ShoppingItemDto>>)
    ),
)]
pub async fn get_shopping_list(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(apartment_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    ApartmentService::new(&state.db)
        .require_membership(apartment_id, resident.resident_id)
        .await?;

    let rows = ShoppingItemRepository::new(&state.db)
        .list_for_apartment(apartment_id)
        .await?;

    let dtos: Vec<ShoppingItemDto> = rows
        .into_iter()
        .map(|row| ShoppingItemDto {
            item_id: row.item_id,
            product_id: row.product_id,
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
            resident_id: row.resident_id,
        })
        .collect();

    Ok((StatusCode::OK, Json(ApiResponse::success(dtos))))
}

/// Add an item to an apartment's shopping list
///
/// The product catalog entry is looked up by name and created if missing.
#[utoipa::path(
    post,
    path = "/api/shopping/apartment/{apartment_id}",
    tag = SHOPPING_TAG,
    params(("apartment_id" = i32, Path, description = "Apartment id")),
    request_body = AddShoppingItemDto,
    responses(
        (status = 201, description = "Item added", body = ApiResponse<ShoppingItemDto>),
        (status = 400, description = "Non-positive quantity", body = ApiResponse<ShoppingItemDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<ShoppingItemDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ShoppingItemDto>)
    ),
)]
pub async fn add_shopping_item(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(apartment_id): Path<i32>,
    Json(payload): Json<AddShoppingItemDto>,
) -> Result<impl IntoResponse, Error> {
    ApartmentService::new(&state.db)
        .require_membership(apartment_id, resident.resident_id)
        .await?;

    let (item, product) = ShoppingService::new(&state.db)
        .add_item(
            apartment_id,
            payload.resident_id,
            &payload.product_name,
            payload.quantity,
            payload.unit,
        )
        .await?;

    let dto = ShoppingItemDto {
        item_id: item.id,
        product_id: product.id,
        name: product.name,
        quantity: item.quantity,
        unit: item.unit,
        resident_id: item.resident_id,
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
}

/// Update a shopping-list item
///
/// Renaming the product renames it on every list that references it.
#[utoipa::path(
    put,
    path = "/api/shopping/{item_id}",
    tag = SHOPPING_TAG,
    params(("item_id" = i32, Path, description = "Shopping item id")),
    request_body = UpdateShoppingItemDto,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<ShoppingItemDto>),
        (status = 400, description = "Non-positive quantity", body = ApiResponse<ShoppingItemDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<ShoppingItemDto>),
        (status = 404, description = "Item not found", body = ApiResponse<ShoppingItemDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ShoppingItemDto>)
    ),
)]
pub async fn update_shopping_item(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(item_id): Path<i32>,
    Json(payload): Json<UpdateShoppingItemDto>,
) -> Result<impl IntoResponse, Error> {
    let item = ShoppingItemRepository::new(&state.db)
        .get(item_id)
        .await?
        .ok_or(Error::NotFound("shopping item"))?;

    ApartmentService::new(&state.db)
        .require_membership(item.apartment_id, resident.resident_id)
        .await?;

    let updated = ShoppingService::new(&state.db)
        .update_item(
            item_id,
            payload.product_name,
            payload.quantity,
            payload.unit,
            payload.resident_id,
        )
        .await?;

    // Re-read the list row so the response carries the current product name
    let rows = ShoppingItemRepository::new(&state.db)
        .list_for_apartment(updated.apartment_id)
        .await?;
    let dto = rows
        .into_iter()
        .find(|row| row.item_id == updated.id)
        .map(|row| ShoppingItemDto {
            item_id: row.item_id,
            product_id: row.product_id,
            name: row.name,
            quantity: row.quantity,
            unit: row.unit,
            resident_id: row.resident_id,
        })
        .ok_or(Error::NotFound("shopping item"))?;

    Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
}

/// Remove a shopping-list item
///
/// Dropping the last item referencing a product removes the product from the
/// catalog as well.
#[utoipa::path(
    delete,
    path = "/api/shopping/{item_id}",
    tag = SHOPPING_TAG,
    params(("item_id" = i32, Path, description = "Shopping item id")),
    responses(
        (status = 200, description = "Item removed", body = ApiResponse<ShoppingItemDto>),
        (status = 403, description = "Caller is not a member", body = ApiResponse<ShoppingItemDto>),
        (status = 404, description = "Item not found", body = ApiResponse<ShoppingItemDto>),
        (status = 500, description = "Internal server error", body = ApiResponse<ShoppingItemDto>)
    ),
)]
pub async fn delete_shopping_item(
    State(state): State<AppState>,
    resident: CurrentResident,
    Path(item_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let item = ShoppingItemRepository::new(&state.db)
        .get(item_id)
        .await?
        .ok_or(Error::NotFound("shopping item"))?;

    ApartmentService::new(&state.db)
        .require_membership(item.apartment_id, resident.resident_id)
        .await?;

    ShoppingService::new(&state.db).remove_item(item_id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::<ShoppingItemDto>::success_empty()),
    ))
}
