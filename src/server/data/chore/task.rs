use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    JoinType, QueryFilter, QuerySelect, RelationTrait, UpdateResult,
};

pub struct TaskRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TaskRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, description: String) -> Result<entity::chore_task::Model, DbErr> {
        let task = entity::chore_task::ActiveModel {
            description: ActiveValue::Set(description),
            ..Default::default()
        };

        task.insert(self.db).await
    }

    pub async fn get(&self, task_id: i32) -> Result<Option<entity::chore_task::Model>, DbErr> {
        entity::prelude::ChoreTask::find_by_id(task_id)
            .one(self.db)
            .await
    }

    /// Tasks whose rotation involves any member of the given apartment,
    /// resolved through allocation -> queue slot -> apartment member.
    pub async fn get_for_apartment(
        &self,
        apartment_id: i32,
    ) -> Result<Vec<entity::chore_task::Model>, DbErr> {
        entity::prelude::ChoreTask::find()
            .join(
                JoinType::InnerJoin,
                entity::chore_task::Relation::ChoreAllocation.def(),
            )
            .join(
                JoinType::InnerJoin,
                entity::chore_allocation::Relation::ChoreQueueSlot.def(),
            )
            .join(
                JoinType::InnerJoin,
                entity::chore_queue_slot::Relation::ApartmentMember.def(),
            )
            .filter(entity::apartment_member::Column::ApartmentId.eq(apartment_id))
            .distinct()
            .all(self.db)
            .await
    }

    /// Updates a task's description. Zero affected rows means the task does not exist.
    pub async fn update_description(
        &self,
        task_id: i32,
        description: String,
    ) -> Result<UpdateResult, DbErr> {
        entity::prelude::ChoreTask::update_many()
            .col_expr(entity::chore_task::Column::Description, Expr::value(description))
            .filter(entity::chore_task::Column::Id.eq(task_id))
            .exec(self.db)
            .await
    }

    pub async fn delete(&self, task_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::ChoreTask::delete_by_id(task_id)
            .exec(self.db)
            .await
    }
}
