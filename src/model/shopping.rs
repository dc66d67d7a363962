use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
}

/// One shopping-list line: the line item joined with its product catalog entry.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ShoppingItemDto {
    pub item_id: i32,
    pub product_id: i32,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub resident_id: i32,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct AddShoppingItemDto {
    pub resident_id: i32,
    pub product_name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct UpdateShoppingItemDto {
    pub product_name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub resident_id: Option<i32>,
}
