use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    QueryFilter,
};

pub struct EventRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EventRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        apartment_id: i32,
        name: String,
        description: Option<String>,
        starts_at: NaiveDateTime,
    ) -> Result<entity::event::Model, DbErr> {
        let event = entity::event::ActiveModel {
            apartment_id: ActiveValue::Set(apartment_id),
            name: ActiveValue::Set(name),
            description: ActiveValue::Set(description),
            starts_at: ActiveValue::Set(starts_at),
            ..Default::default()
        };

        event.insert(self.db).await
    }

    pub async fn get(&self, event_id: i32) -> Result<Option<entity::event::Model>, DbErr> {
        entity::prelude::Event::find_by_id(event_id).one(self.db).await
    }

    pub async fn get_for_apartment(
        &self,
        apartment_id: i32,
    ) -> Result<Vec<entity::event::Model>, DbErr> {
        entity::prelude::Event::find()
            .filter(entity::event::Column::ApartmentId.eq(apartment_id))
            .all(self.db)
            .await
    }

    /// Applies a partial update to an already-fetched event.
    pub async fn update(
        &self,
        event: entity::event::Model,
        name: Option<String>,
        description: Option<String>,
        starts_at: Option<NaiveDateTime>,
    ) -> Result<entity::event::Model, DbErr> {
        let mut active: entity::event::ActiveModel = event.into();

        if let Some(name) = name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(description) = description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(starts_at) = starts_at {
            active.starts_at = ActiveValue::Set(starts_at);
        }

        active.update(self.db).await
    }

    pub async fn delete(&self, event_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Event::delete_by_id(event_id).exec(self.db).await
    }
}
