use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "resident")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub login: String,
    pub password_hash: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::apartment_member::Entity")]
    ApartmentMember,
    #[sea_orm(has_many = "super::shopping_item::Entity")]
    ShoppingItem,
}

impl Related<super::apartment_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApartmentMember.def()
    }
}

impl Related<super::shopping_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
