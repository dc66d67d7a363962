//! Apartment lifecycle and membership.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        apartment::ApartmentRepository, chore::TaskRepository, membership::MembershipRepository,
    },
    error::{auth::AuthError, Error},
    service::rotation::{delete_rotation_rows, remove_member_from_rotations},
    util::access_code::generate_unique_access_code,
};

pub struct ApartmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApartmentService<'a> {
    /// Creates a new instance of [`ApartmentService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an apartment with a freshly generated access code and enrolls
    /// the creator as its first member.
    pub async fn create(
        &self,
        name: String,
        creator_resident_id: i32,
    ) -> Result<entity::apartment::Model, Error> {
        let apartment_repo = ApartmentRepository::new(self.db);

        let issued = apartment_repo.get_access_codes().await?;
        let access_code = generate_unique_access_code(&issued);

        let apartment = apartment_repo.create(name, access_code).await?;
        MembershipRepository::new(self.db)
            .create(apartment.id, creator_resident_id)
            .await?;

        Ok(apartment)
    }

    /// Joins the apartment matching an access code.
    ///
    /// An unknown code is indistinguishable from a missing apartment; joining
    /// twice is rejected.
    pub async fn join(
        &self,
        access_code: &str,
        resident_id: i32,
    ) -> Result<entity::apartment::Model, Error> {
        let apartment = ApartmentRepository::new(self.db)
            .get_by_access_code(access_code)
            .await?
            .ok_or(Error::NotFound("apartment"))?;

        let membership_repo = MembershipRepository::new(self.db);
        if membership_repo
            .get_by_apartment_and_resident(apartment.id, resident_id)
            .await?
            .is_some()
        {
            return Err(Error::InvalidRequest(
                "already a member of this apartment".to_string(),
            ));
        }

        membership_repo.create(apartment.id, resident_id).await?;

        Ok(apartment)
    }

    /// Removes a resident's own membership, atomically pulling them out of
    /// every chore rotation they occupied.
    ///
    /// Surviving rosters are renumbered to stay dense and their cursors
    /// clamped; a rotation losing its only member is removed with its task.
    pub async fn leave(&self, apartment_id: i32, resident_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let membership_repo = MembershipRepository::new(&txn);
        let member = membership_repo
            .get_by_apartment_and_resident(apartment_id, resident_id)
            .await?
            .ok_or(Error::NotFound("membership"))?;

        remove_member_from_rotations(&txn, member.id).await?;
        membership_repo.delete(apartment_id, resident_id).await?;

        txn.commit().await?;

        Ok(())
    }

    /// Deletes an apartment and everything scoped to it.
    ///
    /// Chores have no direct foreign key to the apartment (they hang off
    /// memberships through queue slots), so they are removed explicitly
    /// before the apartment row; members, events and shopping items then go
    /// by cascade.
    pub async fn delete(&self, apartment_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let tasks = TaskRepository::new(&txn)
            .get_for_apartment(apartment_id)
            .await?;
        for task in tasks {
            delete_rotation_rows(&txn, task.id).await?;
        }

        let result = ApartmentRepository::new(&txn).delete(apartment_id).await?;
        if result.rows_affected == 0 {
            return Err(Error::NotFound("apartment"));
        }

        txn.commit().await?;

        Ok(())
    }

    /// Ensures the resident belongs to the apartment before apartment-scoped
    /// reads and writes.
    pub async fn require_membership(
        &self,
        apartment_id: i32,
        resident_id: i32,
    ) -> Result<entity::apartment_member::Model, Error> {
        MembershipRepository::new(self.db)
            .get_by_apartment_and_resident(apartment_id, resident_id)
            .await?
            .ok_or(Error::AuthError(AuthError::NotMember(
                resident_id,
                apartment_id,
            )))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

    use super::ApartmentService;
    use crate::server::{
        data::membership::MembershipRepository,
        error::{auth::AuthError, Error},
        service::rotation::RotationService,
        util::test::{seed_resident, setup_db},
    };

    async fn member_id(
        db: &DatabaseConnection,
        apartment_id: i32,
        resident_id: i32,
    ) -> Result<i32, Error> {
        let member = MembershipRepository::new(db)
            .get_by_apartment_and_resident(apartment_id, resident_id)
            .await?
            .ok_or(Error::NotFound("membership"))?;

        Ok(member.id)
    }

    async fn seed_chore(
        db: &DatabaseConnection,
        roster: &[i32],
    ) -> Result<i32, Error> {
        let chore = RotationService::new(db)
            .create_task(
                "Take out trash".to_string(),
                "2026-01-05T18:00:00".parse().unwrap(),
                7,
                roster,
            )
            .await?;

        Ok(chore.task.id)
    }

    #[tokio::test]
    async fn create_enrolls_creator_and_issues_code() -> Result<(), Error> {
        let db = setup_db().await?;
        let alice = seed_resident(&db, "alice").await?;
        let service = ApartmentService::new(&db);

        let apartment = service.create("Flat 5".to_string(), alice.id).await?;

        assert_eq!(apartment.access_code.len(), 6);
        let members = MembershipRepository::new(&db).members(apartment.id).await?;
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].resident_id, alice.id);

        Ok(())
    }

    #[tokio::test]
    async fn join_by_access_code() -> Result<(), Error> {
        let db = setup_db().await?;
        let alice = seed_resident(&db, "alice").await?;
        let bob = seed_resident(&db, "bob").await?;
        let service = ApartmentService::new(&db);

        let apartment = service.create("Flat 5".to_string(), alice.id).await?;

        let joined = service.join(&apartment.access_code, bob.id).await?;
        assert_eq!(joined.id, apartment.id);

        let members = MembershipRepository::new(&db).members(apartment.id).await?;
        assert_eq!(members.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn joining_twice_is_rejected() -> Result<(), Error> {
        let db = setup_db().await?;
        let alice = seed_resident(&db, "alice").await?;
        let service = ApartmentService::new(&db);

        let apartment = service.create("Flat 5".to_string(), alice.id).await?;

        let result = service.join(&apartment.access_code, alice.id).await;
        assert!(matches!(result, Err(Error::InvalidRequest(_))));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_access_code_is_not_found() -> Result<(), Error> {
        let db = setup_db().await?;
        let bob = seed_resident(&db, "bob").await?;

        let result = ApartmentService::new(&db).join("NOPE00", bob.id).await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        Ok(())
    }

    #[tokio::test]
    async fn leave_removes_membership_once() -> Result<(), Error> {
        let db = setup_db().await?;
        let alice = seed_resident(&db, "alice").await?;
        let service = ApartmentService::new(&db);

        let apartment = service.create("Flat 5".to_string(), alice.id).await?;

        service.leave(apartment.id, alice.id).await?;

        let result = service.leave(apartment.id, alice.id).await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        Ok(())
    }

    /// A member leaving compacts the rotations they occupied: surviving
    /// slots are renumbered to a dense 1..N and the assignee lookup stays
    /// valid.
    #[tokio::test]
    async fn leave_compacts_rotation_slots() -> Result<(), Error> {
        let db = setup_db().await?;
        let alice = seed_resident(&db, "alice").await?;
        let bob = seed_resident(&db, "bob").await?;
        let carol = seed_resident(&db, "carol").await?;
        let service = ApartmentService::new(&db);

        let apartment = service.create("Flat 5".to_string(), alice.id).await?;
        service.join(&apartment.access_code, bob.id).await?;
        service.join(&apartment.access_code, carol.id).await?;

        let m_alice = member_id(&db, apartment.id, alice.id).await?;
        let m_bob = member_id(&db, apartment.id, bob.id).await?;
        let m_carol = member_id(&db, apartment.id, carol.id).await?;
        let task_id = seed_chore(&db, &[m_alice, m_bob, m_carol]).await?;

        service.leave(apartment.id, alice.id).await?;

        let rotation = RotationService::new(&db);
        let state = rotation.get_state(task_id).await?;
        let positions: Vec<i32> = state.slots.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![1, 2]);
        let occupants: Vec<i32> = state.slots.iter().map(|s| s.member_id).collect();
        assert_eq!(occupants, vec![m_bob, m_carol]);

        let assignee = rotation.current_assignee(task_id).await?;
        assert_eq!(assignee.member_id, m_bob);

        Ok(())
    }

    /// When the departing member held the cursor's slot at the end of the
    /// roster, the cursor is clamped into the shrunken range.
    #[tokio::test]
    async fn leave_clamps_cursor_into_shrunken_roster() -> Result<(), Error> {
        let db = setup_db().await?;
        let alice = seed_resident(&db, "alice").await?;
        let bob = seed_resident(&db, "bob").await?;
        let carol = seed_resident(&db, "carol").await?;
        let service = ApartmentService::new(&db);

        let apartment = service.create("Flat 5".to_string(), alice.id).await?;
        service.join(&apartment.access_code, bob.id).await?;
        service.join(&apartment.access_code, carol.id).await?;

        let m_alice = member_id(&db, apartment.id, alice.id).await?;
        let m_bob = member_id(&db, apartment.id, bob.id).await?;
        let m_carol = member_id(&db, apartment.id, carol.id).await?;
        let task_id = seed_chore(&db, &[m_alice, m_bob, m_carol]).await?;

        let rotation = RotationService::new(&db);
        rotation.advance_cycle(task_id, 3).await?;

        service.leave(apartment.id, carol.id).await?;

        let state = rotation.get_state(task_id).await?;
        assert_eq!(state.allocation.current_position, 2);
        let assignee = rotation.current_assignee(task_id).await?;
        assert_eq!(assignee.member_id, m_bob);

        Ok(())
    }

    /// A rotation losing its only member is removed along with its task.
    #[tokio::test]
    async fn leave_removes_chore_left_without_roster() -> Result<(), Error> {
        let db = setup_db().await?;
        let alice = seed_resident(&db, "alice").await?;
        let service = ApartmentService::new(&db);

        let apartment = service.create("Flat 5".to_string(), alice.id).await?;
        let m_alice = member_id(&db, apartment.id, alice.id).await?;
        seed_chore(&db, &[m_alice]).await?;

        service.leave(apartment.id, alice.id).await?;

        assert_eq!(entity::prelude::ChoreQueueSlot::find().count(&db).await?, 0);
        assert_eq!(entity::prelude::ChoreAllocation::find().count(&db).await?, 0);
        assert_eq!(entity::prelude::ChoreTask::find().count(&db).await?, 0);

        Ok(())
    }

    /// Deleting an apartment removes its chore rotations, which have no
    /// foreign-key path to the apartment row.
    #[tokio::test]
    async fn delete_removes_the_apartments_chores() -> Result<(), Error> {
        let db = setup_db().await?;
        let alice = seed_resident(&db, "alice").await?;
        let bob = seed_resident(&db, "bob").await?;
        let service = ApartmentService::new(&db);

        let apartment = service.create("Flat 5".to_string(), alice.id).await?;
        service.join(&apartment.access_code, bob.id).await?;

        let m_alice = member_id(&db, apartment.id, alice.id).await?;
        let m_bob = member_id(&db, apartment.id, bob.id).await?;
        seed_chore(&db, &[m_alice, m_bob]).await?;

        service.delete(apartment.id).await?;

        assert_eq!(entity::prelude::ChoreQueueSlot::find().count(&db).await?, 0);
        assert_eq!(entity::prelude::ChoreAllocation::find().count(&db).await?, 0);
        assert_eq!(entity::prelude::ChoreTask::find().count(&db).await?, 0);
        assert!(entity::prelude::Apartment::find_by_id(apartment.id)
            .one(&db)
            .await?
            .is_none());

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_apartment_is_not_found() -> Result<(), Error> {
        let db = setup_db().await?;

        let result = ApartmentService::new(&db).delete(999).await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        Ok(())
    }

    #[tokio::test]
    async fn require_membership_rejects_outsiders() -> Result<(), Error> {
        let db = setup_db().await?;
        let alice = seed_resident(&db, "alice").await?;
        let mallory = seed_resident(&db, "mallory").await?;
        let service = ApartmentService::new(&db);

        let apartment = service.create("Flat 5".to_string(), alice.id).await?;

        service.require_membership(apartment.id, alice.id).await?;

        let result = service.require_membership(apartment.id, mallory.id).await;
        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::NotMember(_, _)))
        ));

        Ok(())
    }
}
