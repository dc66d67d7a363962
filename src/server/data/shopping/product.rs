use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter, UpdateResult,
};

pub struct ProductRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProductRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: String) -> Result<entity::product::Model, DbErr> {
        let product = entity::product::ActiveModel {
            name: ActiveValue::Set(name),
            ..Default::default()
        };

        product.insert(self.db).await
    }

    pub async fn get_all(&self) -> Result<Vec<entity::product::Model>, DbErr> {
        entity::prelude::Product::find().all(self.db).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<entity::product::Model>, DbErr> {
        entity::prelude::Product::find()
            .filter(entity::product::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    pub async fn rename(&self, product_id: i32, name: String) -> Result<UpdateResult, DbErr> {
        entity::prelude::Product::update_many()
            .col_expr(entity::product::Column::Name, Expr::value(name))
            .filter(entity::product::Column::Id.eq(product_id))
            .exec(self.db)
            .await
    }

    pub async fn delete(&self, product_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Product::delete_by_id(product_id)
            .exec(self.db)
            .await
    }
}
