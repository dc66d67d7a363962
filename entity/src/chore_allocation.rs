use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chore_allocation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub task_id: i32,
    pub starts_at: DateTime,
    pub interval_days: i32,
    /// 1-indexed cursor into the roster; always within `[1, roster_size]`.
    pub current_position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chore_task::Entity",
        from = "Column::TaskId",
        to = "super::chore_task::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ChoreTask,
    #[sea_orm(has_many = "super::chore_queue_slot::Entity")]
    ChoreQueueSlot,
}

impl Related<super::chore_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChoreTask.def()
    }
}

impl Related<super::chore_queue_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChoreQueueSlot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
