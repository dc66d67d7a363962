use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "chore_task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::chore_allocation::Entity")]
    ChoreAllocation,
}

impl Related<super::chore_allocation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChoreAllocation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
