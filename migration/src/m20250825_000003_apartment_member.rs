use sea_orm_migration::{prelude::*, schema::*};

use super::{m20250825_000001_apartment::Apartment, m20250825_000002_resident::Resident};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApartmentMember::Table)
                    .if_not_exists()
                    .col(pk_auto(ApartmentMember::Id))
                    .col(integer(ApartmentMember::ApartmentId))
                    .col(integer(ApartmentMember::ResidentId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_apartment_member_apartment")
                            .from(ApartmentMember::Table, ApartmentMember::ApartmentId)
                            .to(Apartment::Table, Apartment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_apartment_member_resident")
                            .from(ApartmentMember::Table, ApartmentMember::ResidentId)
                            .to(Resident::Table, Resident::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_apartment_member_unique")
                    .table(ApartmentMember::Table)
                    .col(ApartmentMember::ApartmentId)
                    .col(ApartmentMember::ResidentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApartmentMember::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ApartmentMember {
    Table,
    Id,
    ApartmentId,
    ResidentId,
}
