use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    FromQueryResult, QueryFilter, QuerySelect,
};

/// One apartment member joined with the resident's login.
#[derive(FromQueryResult, Debug, PartialEq, Eq)]
pub struct MemberRow {
    pub member_id: i32,
    pub resident_id: i32,
    pub login: String,
}

pub struct MembershipRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MembershipRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        apartment_id: i32,
        resident_id: i32,
    ) -> Result<entity::apartment_member::Model, DbErr> {
        let member = entity::apartment_member::ActiveModel {
            apartment_id: ActiveValue::Set(apartment_id),
            resident_id: ActiveValue::Set(resident_id),
            ..Default::default()
        };

        member.insert(self.db).await
    }

    pub async fn get(
        &self,
        member_id: i32,
    ) -> Result<Option<entity::apartment_member::Model>, DbErr> {
        entity::prelude::ApartmentMember::find_by_id(member_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_apartment_and_resident(
        &self,
        apartment_id: i32,
        resident_id: i32,
    ) -> Result<Option<entity::apartment_member::Model>, DbErr> {
        entity::prelude::ApartmentMember::find()
            .filter(entity::apartment_member::Column::ApartmentId.eq(apartment_id))
            .filter(entity::apartment_member::Column::ResidentId.eq(resident_id))
            .one(self.db)
            .await
    }

    /// Lists an apartment's members together with their logins.
    pub async fn members(&self, apartment_id: i32) -> Result<Vec<MemberRow>, DbErr> {
        entity::prelude::ApartmentMember::find()
            .select_only()
            .column_as(entity::apartment_member::Column::Id, "member_id")
            .column_as(entity::apartment_member::Column::ResidentId, "resident_id")
            .column_as(entity::resident::Column::Login, "login")
            .inner_join(entity::prelude::Resident)
            .filter(entity::apartment_member::Column::ApartmentId.eq(apartment_id))
            .into_model::<MemberRow>()
            .all(self.db)
            .await
    }

    /// Every apartment a resident belongs to.
    pub async fn apartments_for_resident(
        &self,
        resident_id: i32,
    ) -> Result<Vec<entity::apartment::Model>, DbErr> {
        entity::prelude::Apartment::find()
            .inner_join(entity::prelude::ApartmentMember)
            .filter(entity::apartment_member::Column::ResidentId.eq(resident_id))
            .all(self.db)
            .await
    }

    pub async fn delete(
        &self,
        apartment_id: i32,
        resident_id: i32,
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::ApartmentMember::delete_many()
            .filter(entity::apartment_member::Column::ApartmentId.eq(apartment_id))
            .filter(entity::apartment_member::Column::ResidentId.eq(resident_id))
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::MembershipRepository;
    use crate::server::util::test::{seed_apartment, seed_resident, setup_db};

    #[tokio::test]
    async fn members_returns_logins_for_one_apartment() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let repo = MembershipRepository::new(&db);

        let apartment = seed_apartment(&db, "Flat 5").await?;
        let other = seed_apartment(&db, "Flat 6").await?;
        let alice = seed_resident(&db, "alice").await?;
        let bob = seed_resident(&db, "bob").await?;

        repo.create(apartment.id, alice.id).await?;
        repo.create(apartment.id, bob.id).await?;
        repo.create(other.id, bob.id).await?;

        let mut members = repo.members(apartment.id).await?;
        members.sort_by(|a, b| a.login.cmp(&b.login));

        assert_eq!(members.len(), 2);
        assert_eq!(members[0].login, "alice");
        assert_eq!(members[0].resident_id, alice.id);
        assert_eq!(members[1].login, "bob");

        Ok(())
    }

    #[tokio::test]
    async fn apartments_for_resident_spans_memberships() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let repo = MembershipRepository::new(&db);

        let apartment = seed_apartment(&db, "Flat 5").await?;
        let other = seed_apartment(&db, "Flat 6").await?;
        let alice = seed_resident(&db, "alice").await?;

        repo.create(apartment.id, alice.id).await?;
        repo.create(other.id, alice.id).await?;

        let apartments = repo.apartments_for_resident(alice.id).await?;
        assert_eq!(apartments.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_membership() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let repo = MembershipRepository::new(&db);

        let apartment = seed_apartment(&db, "Flat 5").await?;
        let alice = seed_resident(&db, "alice").await?;
        let bob = seed_resident(&db, "bob").await?;

        repo.create(apartment.id, alice.id).await?;
        repo.create(apartment.id, bob.id).await?;

        let result = repo.delete(apartment.id, alice.id).await?;
        assert_eq!(result.rows_affected, 1);

        let remaining = repo.members(apartment.id).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].login, "bob");

        let result = repo.delete(apartment.id, alice.id).await?;
        assert_eq!(result.rows_affected, 0);

        Ok(())
    }
}
