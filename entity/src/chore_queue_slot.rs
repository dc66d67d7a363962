use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chore_queue_slot")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub allocation_id: i32,
    /// 1-indexed roster position; dense 1..N, unique within an allocation.
    pub position: i32,
    pub member_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chore_allocation::Entity",
        from = "Column::AllocationId",
        to = "super::chore_allocation::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ChoreAllocation,
    #[sea_orm(
        belongs_to = "super::apartment_member::Entity",
        from = "Column::MemberId",
        to = "super::apartment_member::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ApartmentMember,
}

impl Related<super::chore_allocation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChoreAllocation.def()
    }
}

impl Related<super::apartment_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApartmentMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
