use migration::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter, QuerySelect, UpdateResult,
};

pub struct ApartmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ApartmentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: String,
        access_code: String,
    ) -> Result<entity::apartment::Model, DbErr> {
        let apartment = entity::apartment::ActiveModel {
            name: ActiveValue::Set(name),
            access_code: ActiveValue::Set(access_code),
            ..Default::default()
        };

        apartment.insert(self.db).await
    }

    pub async fn get(&self, apartment_id: i32) -> Result<Option<entity::apartment::Model>, DbErr> {
        entity::prelude::Apartment::find_by_id(apartment_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_access_code(
        &self,
        access_code: &str,
    ) -> Result<Option<entity::apartment::Model>, DbErr> {
        entity::prelude::Apartment::find()
            .filter(entity::apartment::Column::AccessCode.eq(access_code))
            .one(self.db)
            .await
    }

    /// Every access code currently issued, for rejection sampling new codes against.
    pub async fn get_access_codes(&self) -> Result<Vec<String>, DbErr> {
        entity::prelude::Apartment::find()
            .select_only()
            .column(entity::apartment::Column::AccessCode)
            .into_tuple::<String>()
            .all(self.db)
            .await
    }

    /// Renames an apartment. Zero affected rows means the apartment does not exist.
    pub async fn update_name(&self, apartment_id: i32, name: String) -> Result<UpdateResult, DbErr> {
        entity::prelude::Apartment::update_many()
            .col_expr(entity::apartment::Column::Name, Expr::value(name))
            .filter(entity::apartment::Column::Id.eq(apartment_id))
            .exec(self.db)
            .await
    }

    pub async fn delete(&self, apartment_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Apartment::delete_by_id(apartment_id)
            .exec(self.db)
            .await
    }
}
