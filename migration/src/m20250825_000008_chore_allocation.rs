use sea_orm_migration::{prelude::*, schema::*};

use super::m20250825_000007_chore_task::ChoreTask;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ChoreAllocation::Table)
                    .if_not_exists()
                    .col(pk_auto(ChoreAllocation::Id))
                    .col(integer_uniq(ChoreAllocation::TaskId))
                    .col(timestamp(ChoreAllocation::StartsAt))
                    .col(integer(ChoreAllocation::IntervalDays))
                    .col(integer(ChoreAllocation::CurrentPosition))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chore_allocation_task")
                            .from(ChoreAllocation::Table, ChoreAllocation::TaskId)
                            .to(ChoreTask::Table, ChoreTask::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChoreAllocation::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ChoreAllocation {
    Table,
    Id,
    TaskId,
    StartsAt,
    IntervalDays,
    CurrentPosition,
}
