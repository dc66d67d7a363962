use migration::Expr;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

pub struct QueueSlotRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> QueueSlotRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts one slot per roster member, numbered 1..N in the order given.
    ///
    /// The caller guarantees a non-empty roster.
    pub async fn create_many(&self, allocation_id: i32, member_ids: &[i32]) -> Result<(), DbErr> {
        let slots = member_ids
            .iter()
            .enumerate()
            .map(|(index, member_id)| entity::chore_queue_slot::ActiveModel {
                allocation_id: ActiveValue::Set(allocation_id),
                position: ActiveValue::Set(index as i32 + 1),
                member_id: ActiveValue::Set(*member_id),
                ..Default::default()
            });

        entity::prelude::ChoreQueueSlot::insert_many(slots)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Current roster size for an allocation.
    pub async fn count(&self, allocation_id: i32) -> Result<u64, DbErr> {
        entity::prelude::ChoreQueueSlot::find()
            .filter(entity::chore_queue_slot::Column::AllocationId.eq(allocation_id))
            .count(self.db)
            .await
    }

    pub async fn get_by_position(
        &self,
        allocation_id: i32,
        position: i32,
    ) -> Result<Option<entity::chore_queue_slot::Model>, DbErr> {
        entity::prelude::ChoreQueueSlot::find()
            .filter(entity::chore_queue_slot::Column::AllocationId.eq(allocation_id))
            .filter(entity::chore_queue_slot::Column::Position.eq(position))
            .one(self.db)
            .await
    }

    /// All slots for an allocation, in rotation order.
    pub async fn get_for_allocation(
        &self,
        allocation_id: i32,
    ) -> Result<Vec<entity::chore_queue_slot::Model>, DbErr> {
        entity::prelude::ChoreQueueSlot::find()
            .filter(entity::chore_queue_slot::Column::AllocationId.eq(allocation_id))
            .order_by_asc(entity::chore_queue_slot::Column::Position)
            .all(self.db)
            .await
    }

    /// Every slot a member occupies, across all of their rotations.
    pub async fn get_for_member(
        &self,
        member_id: i32,
    ) -> Result<Vec<entity::chore_queue_slot::Model>, DbErr> {
        entity::prelude::ChoreQueueSlot::find()
            .filter(entity::chore_queue_slot::Column::MemberId.eq(member_id))
            .all(self.db)
            .await
    }

    pub async fn set_slot_position(&self, slot_id: i32, position: i32) -> Result<(), DbErr> {
        entity::prelude::ChoreQueueSlot::update_many()
            .col_expr(
                entity::chore_queue_slot::Column::Position,
                Expr::value(position),
            )
            .filter(entity::chore_queue_slot::Column::Id.eq(slot_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, slot_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::ChoreQueueSlot::delete_by_id(slot_id)
            .exec(self.db)
            .await
    }

    pub async fn delete_for_allocation(&self, allocation_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::ChoreQueueSlot::delete_many()
            .filter(entity::chore_queue_slot::Column::AllocationId.eq(allocation_id))
            .exec(self.db)
            .await
    }
}
