use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250825_000003_apartment_member::ApartmentMember,
    m20250825_000008_chore_allocation::ChoreAllocation,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChoreQueueSlot::Table)
                    .if_not_exists()
                    .col(pk_auto(ChoreQueueSlot::Id))
                    .col(integer(ChoreQueueSlot::AllocationId))
                    .col(integer(ChoreQueueSlot::Position))
                    .col(integer(ChoreQueueSlot::MemberId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chore_queue_slot_allocation")
                            .from(ChoreQueueSlot::Table, ChoreQueueSlot::AllocationId)
                            .to(ChoreAllocation::Table, ChoreAllocation::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chore_queue_slot_member")
                            .from(ChoreQueueSlot::Table, ChoreQueueSlot::MemberId)
                            .to(ApartmentMember::Table, ApartmentMember::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chore_queue_slot_position_unique")
                    .table(ChoreQueueSlot::Table)
                    .col(ChoreQueueSlot::AllocationId)
                    .col(ChoreQueueSlot::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChoreQueueSlot::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ChoreQueueSlot {
    Table,
    Id,
    AllocationId,
    Position,
    MemberId,
}
