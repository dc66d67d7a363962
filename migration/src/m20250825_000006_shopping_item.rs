use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250825_000001_apartment::Apartment, m20250825_000002_resident::Resident,
    m20250825_000005_product::Product,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShoppingItem::Table)
                    .if_not_exists()
                    .col(pk_auto(ShoppingItem::Id))
                    .col(integer(ShoppingItem::ApartmentId))
                    .col(integer(ShoppingItem::ProductId))
                    .col(integer(ShoppingItem::ResidentId))
                    .col(double(ShoppingItem::Quantity))
                    .col(string(ShoppingItem::Unit))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shopping_item_apartment")
                            .from(ShoppingItem::Table, ShoppingItem::ApartmentId)
                            .to(Apartment::Table, Apartment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shopping_item_product")
                            .from(ShoppingItem::Table, ShoppingItem::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shopping_item_resident")
                            .from(ShoppingItem::Table, ShoppingItem::ResidentId)
                            .to(Resident::Table, Resident::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShoppingItem::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ShoppingItem {
    Table,
    Id,
    ApartmentId,
    ProductId,
    ResidentId,
    Quantity,
    Unit,
}
