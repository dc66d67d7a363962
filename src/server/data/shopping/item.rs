use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QuerySelect,
};

/// One shopping-list line: line item joined with its product catalog entry.
#[derive(FromQueryResult, Debug, PartialEq)]
pub struct ShoppingListRow {
    pub item_id: i32,
    pub product_id: i32,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub resident_id: i32,
}

pub struct ShoppingItemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ShoppingItemRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        apartment_id: i32,
        product_id: i32,
        resident_id: i32,
        quantity: f64,
        unit: String,
    ) -> Result<entity::shopping_item::Model, DbErr> {
        let item = entity::shopping_item::ActiveModel {
            apartment_id: ActiveValue::Set(apartment_id),
            product_id: ActiveValue::Set(product_id),
            resident_id: ActiveValue::Set(resident_id),
            quantity: ActiveValue::Set(quantity),
            unit: ActiveValue::Set(unit),
            ..Default::default()
        };

        item.insert(self.db).await
    }

    pub async fn get(&self, item_id: i32) -> Result<Option<entity::shopping_item::Model>, DbErr> {
        entity::prelude::ShoppingItem::find_by_id(item_id)
            .one(self.db)
            .await
    }

    /// An apartment's shopping list with product names resolved.
    pub async fn list_for_apartment(
        &self,
        apartment_id: i32,
    ) -> Result<Vec<ShoppingListRow>, DbErr> {
        entity::prelude::ShoppingItem::find()
            .select_only()
            .column_as(entity::shopping_item::Column::Id, "item_id")
            .column_as(entity::shopping_item::Column::ProductId, "product_id")
            .column_as(entity::product::Column::Name, "name")
            .column_as(entity::shopping_item::Column::Quantity, "quantity")
            .column_as(entity::shopping_item::Column::Unit, "unit")
            .column_as(entity::shopping_item::Column::ResidentId, "resident_id")
            .inner_join(entity::prelude::Product)
            .filter(entity::shopping_item::Column::ApartmentId.eq(apartment_id))
            .into_model::<ShoppingListRow>()
            .all(self.db)
            .await
    }

    /// Applies a partial update to an already-fetched line item.
    pub async fn update(
        &self,
        item: entity::shopping_item::Model,
        product_id: Option<i32>,
        quantity: Option<f64>,
        unit: Option<String>,
        resident_id: Option<i32>,
    ) -> Result<entity::shopping_item::Model, DbErr> {
        let mut active: entity::shopping_item::ActiveModel = item.into();

        if let Some(product_id) = product_id {
            active.product_id = ActiveValue::Set(product_id);
        }
        if let Some(quantity) = quantity {
            active.quantity = ActiveValue::Set(quantity);
        }
        if let Some(unit) = unit {
            active.unit = ActiveValue::Set(unit);
        }
        if let Some(resident_id) = resident_id {
            active.resident_id = ActiveValue::Set(resident_id);
        }

        active.update(self.db).await
    }

    pub async fn delete(&self, item_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::ShoppingItem::delete_by_id(item_id)
            .exec(self.db)
            .await
    }

    /// How many line items still reference a product, for orphan cleanup.
    pub async fn count_for_product(&self, product_id: i32) -> Result<u64, DbErr> {
        entity::prelude::ShoppingItem::find()
            .filter(entity::shopping_item::Column::ProductId.eq(product_id))
            .count(self.db)
            .await
    }
}
