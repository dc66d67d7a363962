use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::shopping_item::Entity")]
    ShoppingItem,
}

impl Related<super::shopping_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShoppingItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
