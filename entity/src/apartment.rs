use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "apartment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub access_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::apartment_member::Entity")]
    ApartmentMember,
    #[sea_orm(has_many = "super::event::Entity")]
    Event,
    #[sea_orm(has_many = "super::shopping_item::Entity")]
    ShoppingItem,
}

impl Related<super::apartment_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApartmentMember.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::shopping_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
