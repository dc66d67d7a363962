//! The shopping ledger: a shared product catalog plus per-apartment line
//! items. Products are created on demand when a list line names something new
//! and garbage-collected once no line item references them.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::shopping::{item::ShoppingItemRepository, product::ProductRepository},
    error::Error,
};

pub struct ShoppingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ShoppingService<'a> {
    /// Creates a new instance of [`ShoppingService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a line item, reusing the catalog entry for `product_name` or
    /// creating one, atomically.
    pub async fn add_item(
        &self,
        apartment_id: i32,
        resident_id: i32,
        product_name: &str,
        quantity: f64,
        unit: String,
    ) -> Result<(entity::shopping_item::Model, entity::product::Model), Error> {
        if quantity <= 0.0 {
            return Err(Error::InvalidRequest(
                "quantity must be positive".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let product_repo = ProductRepository::new(&txn);
        let product = match product_repo.get_by_name(product_name).await? {
            Some(product) => product,
            None => product_repo.create(product_name.to_string()).await?,
        };

        let item = ShoppingItemRepository::new(&txn)
            .create(apartment_id, product.id, resident_id, quantity, unit)
            .await?;

        txn.commit().await?;

        Ok((item, product))
    }

    /// Removes a line item and, when it was the product's last reference,
    /// the catalog entry as well.
    pub async fn remove_item(&self, item_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let item_repo = ShoppingItemRepository::new(&txn);
        let item = item_repo
            .get(item_id)
            .await?
            .ok_or(Error::NotFound("shopping item"))?;

        item_repo.delete(item_id).await?;

        if item_repo.count_for_product(item.product_id).await? == 0 {
            ProductRepository::new(&txn).delete(item.product_id).await?;
        }

        txn.commit().await?;

        Ok(())
    }

    /// Applies a partial update to a line item.
    ///
    /// A new product name follows find-or-create semantics: when a catalog
    /// entry with that name already exists the line is repointed at it (the
    /// name column is unique), otherwise the line's own product is renamed,
    /// so every list referencing it changes name too. Quantity, unit and the
    /// claiming resident stay per line.
    pub async fn update_item(
        &self,
        item_id: i32,
        product_name: Option<String>,
        quantity: Option<f64>,
        unit: Option<String>,
        resident_id: Option<i32>,
    ) -> Result<entity::shopping_item::Model, Error> {
        if let Some(quantity) = quantity {
            if quantity <= 0.0 {
                return Err(Error::InvalidRequest(
                    "quantity must be positive".to_string(),
                ));
            }
        }

        let txn = self.db.begin().await?;

        let item_repo = ShoppingItemRepository::new(&txn);
        let item = item_repo
            .get(item_id)
            .await?
            .ok_or(Error::NotFound("shopping item"))?;

        let old_product_id = item.product_id;
        let mut new_product_id = None;
        if let Some(name) = product_name {
            let product_repo = ProductRepository::new(&txn);
            match product_repo.get_by_name(&name).await? {
                Some(existing) if existing.id != old_product_id => {
                    new_product_id = Some(existing.id);
                }
                Some(_) => {}
                None => {
                    product_repo.rename(old_product_id, name).await?;
                }
            }
        }

        let updated = item_repo
            .update(item, new_product_id, quantity, unit, resident_id)
            .await?;

        // Repointing may orphan the old catalog entry
        if new_product_id.is_some() && item_repo.count_for_product(old_product_id).await? == 0 {
            ProductRepository::new(&txn).delete(old_product_id).await?;
        }

        txn.commit().await?;

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::ShoppingService;
    use crate::server::{
        data::shopping::{item::ShoppingItemRepository, product::ProductRepository},
        error::Error,
        util::test::{seed_apartment_with_members, setup_db},
    };

    #[tokio::test]
    async fn add_item_creates_product_on_first_use() -> Result<(), Error> {
        let db = setup_db().await?;
        let (apartment, _) = seed_apartment_with_members(&db, 1).await?;
        let service = ShoppingService::new(&db);

        let (item, product) = service
            .add_item(apartment.id, 1, "Milk", 2.0, "l".to_string())
            .await?;

        assert_eq!(product.name, "Milk");
        assert_eq!(item.product_id, product.id);
        assert_eq!(item.quantity, 2.0);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_reuses_existing_product() -> Result<(), Error> {
        let db = setup_db().await?;
        let (apartment, _) = seed_apartment_with_members(&db, 1).await?;
        let service = ShoppingService::new(&db);

        let (_, first) = service
            .add_item(apartment.id, 1, "Milk", 2.0, "l".to_string())
            .await?;
        let (_, second) = service
            .add_item(apartment.id, 1, "Milk", 1.0, "l".to_string())
            .await?;

        assert_eq!(first.id, second.id);
        assert_eq!(ProductRepository::new(&db).get_all().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn non_positive_quantity_is_rejected() -> Result<(), Error> {
        let db = setup_db().await?;
        let (apartment, _) = seed_apartment_with_members(&db, 1).await?;
        let service = ShoppingService::new(&db);

        let result = service
            .add_item(apartment.id, 1, "Milk", 0.0, "l".to_string())
            .await;
        assert!(matches!(result, Err(Error::InvalidRequest(_))));

        Ok(())
    }

    #[tokio::test]
    async fn removing_last_reference_drops_the_product() -> Result<(), Error> {
        let db = setup_db().await?;
        let (apartment, _) = seed_apartment_with_members(&db, 1).await?;
        let service = ShoppingService::new(&db);

        let (item, _) = service
            .add_item(apartment.id, 1, "Milk", 2.0, "l".to_string())
            .await?;

        service.remove_item(item.id).await?;

        assert!(ProductRepository::new(&db).get_all().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn product_survives_while_other_lines_reference_it() -> Result<(), Error> {
        let db = setup_db().await?;
        let (apartment, _) = seed_apartment_with_members(&db, 1).await?;
        let service = ShoppingService::new(&db);

        let (first, product) = service
            .add_item(apartment.id, 1, "Milk", 2.0, "l".to_string())
            .await?;
        service
            .add_item(apartment.id, 1, "Milk", 1.0, "l".to_string())
            .await?;

        service.remove_item(first.id).await?;

        let remaining = ProductRepository::new(&db).get_all().await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, product.id);

        Ok(())
    }

    #[tokio::test]
    async fn removing_unknown_item_is_not_found() -> Result<(), Error> {
        let db = setup_db().await?;

        let result = ShoppingService::new(&db).remove_item(999).await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        Ok(())
    }

    /// Renaming a line to a name already in the catalog repoints the line at
    /// the existing entry instead of tripping the unique name constraint, and
    /// drops the old entry once nothing references it.
    #[tokio::test]
    async fn rename_to_existing_product_repoints_the_line() -> Result<(), Error> {
        let db = setup_db().await?;
        let (apartment, _) = seed_apartment_with_members(&db, 1).await?;
        let service = ShoppingService::new(&db);

        let (milk_item, milk) = service
            .add_item(apartment.id, 1, "Milk", 2.0, "l".to_string())
            .await?;
        let (_, bread) = service
            .add_item(apartment.id, 1, "Bread", 1.0, "pcs".to_string())
            .await?;

        let updated = service
            .update_item(milk_item.id, Some("Bread".to_string()), None, None, None)
            .await?;

        assert_eq!(updated.product_id, bread.id);
        let remaining = ProductRepository::new(&db).get_all().await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Bread");
        assert!(remaining.iter().all(|p| p.id != milk.id));

        Ok(())
    }

    /// Renaming a line to its product's current name is a no-op.
    #[tokio::test]
    async fn rename_to_same_name_keeps_the_product() -> Result<(), Error> {
        let db = setup_db().await?;
        let (apartment, _) = seed_apartment_with_members(&db, 1).await?;
        let service = ShoppingService::new(&db);

        let (item, product) = service
            .add_item(apartment.id, 1, "Milk", 2.0, "l".to_string())
            .await?;

        let updated = service
            .update_item(item.id, Some("Milk".to_string()), None, None, None)
            .await?;

        assert_eq!(updated.product_id, product.id);
        assert_eq!(ProductRepository::new(&db).get_all().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn update_renames_the_shared_product() -> Result<(), Error> {
        let db = setup_db().await?;
        let (apartment, _) = seed_apartment_with_members(&db, 1).await?;
        let service = ShoppingService::new(&db);

        let (item, _) = service
            .add_item(apartment.id, 1, "Milk", 2.0, "l".to_string())
            .await?;

        let updated = service
            .update_item(item.id, Some("Oat milk".to_string()), Some(3.0), None, None)
            .await?;

        assert_eq!(updated.quantity, 3.0);
        let rows = ShoppingItemRepository::new(&db)
            .list_for_apartment(apartment.id)
            .await?;
        assert_eq!(rows[0].name, "Oat milk");

        Ok(())
    }
}
