use sea_orm_migration::{prelude::*, schema::*};

use super::m20250825_000001_apartment::Apartment;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(integer(Event::ApartmentId))
                    .col(string(Event::Name))
                    .col(string_null(Event::Description))
                    .col(timestamp(Event::StartsAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_apartment")
                            .from(Event::Table, Event::ApartmentId)
                            .to(Apartment::Table, Apartment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    ApartmentId,
    Name,
    Description,
    StartsAt,
}
