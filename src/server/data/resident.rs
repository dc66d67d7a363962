use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct ResidentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ResidentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        login: String,
        password_hash: String,
    ) -> Result<entity::resident::Model, DbErr> {
        let resident = entity::resident::ActiveModel {
            login: ActiveValue::Set(login),
            password_hash: ActiveValue::Set(password_hash),
            ..Default::default()
        };

        resident.insert(self.db).await
    }

    pub async fn get_by_login(
        &self,
        login: &str,
    ) -> Result<Option<entity::resident::Model>, DbErr> {
        entity::prelude::Resident::find()
            .filter(entity::resident::Column::Login.eq(login))
            .one(self.db)
            .await
    }
}
