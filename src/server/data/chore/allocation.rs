use chrono::NaiveDateTime;
use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter, UpdateResult,
};

pub struct AllocationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AllocationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates the rotation state for a task, with the cursor at position 1.
    pub async fn create(
        &self,
        task_id: i32,
        starts_at: NaiveDateTime,
        interval_days: i32,
    ) -> Result<entity::chore_allocation::Model, DbErr> {
        let allocation = entity::chore_allocation::ActiveModel {
            task_id: ActiveValue::Set(task_id),
            starts_at: ActiveValue::Set(starts_at),
            interval_days: ActiveValue::Set(interval_days),
            current_position: ActiveValue::Set(1),
            ..Default::default()
        };

        allocation.insert(self.db).await
    }

    pub async fn get(
        &self,
        allocation_id: i32,
    ) -> Result<Option<entity::chore_allocation::Model>, DbErr> {
        entity::prelude::ChoreAllocation::find_by_id(allocation_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_task_id(
        &self,
        task_id: i32,
    ) -> Result<Option<entity::chore_allocation::Model>, DbErr> {
        entity::prelude::ChoreAllocation::find()
            .filter(entity::chore_allocation::Column::TaskId.eq(task_id))
            .one(self.db)
            .await
    }

    pub async fn set_position(
        &self,
        allocation_id: i32,
        position: i32,
    ) -> Result<UpdateResult, DbErr> {
        entity::prelude::ChoreAllocation::update_many()
            .col_expr(
                entity::chore_allocation::Column::CurrentPosition,
                Expr::value(position),
            )
            .filter(entity::chore_allocation::Column::Id.eq(allocation_id))
            .exec(self.db)
            .await
    }

    pub async fn delete(&self, allocation_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::ChoreAllocation::delete_by_id(allocation_id)
            .exec(self.db)
            .await
    }
}
