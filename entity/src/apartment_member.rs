use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "apartment_member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub apartment_id: i32,
    pub resident_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::apartment::Entity",
        from = "Column::ApartmentId",
        to = "super::apartment::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Apartment,
    #[sea_orm(
        belongs_to = "super::resident::Entity",
        from = "Column::ResidentId",
        to = "super::resident::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Resident,
    #[sea_orm(has_many = "super::chore_queue_slot::Entity")]
    ChoreQueueSlot,
}

impl Related<super::apartment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Apartment.def()
    }
}

impl Related<super::resident::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resident.def()
    }
}

impl Related<super::chore_queue_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChoreQueueSlot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
