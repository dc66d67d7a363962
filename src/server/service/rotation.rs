//! The chore rotation engine.
//!
//! A chore (task) owns exactly one allocation, which carries the rotation
//! state: a 1-indexed cursor into an ordered, circular roster of apartment
//! members stored as queue slots numbered 1..N. Advancing the cycle maps a
//! requested position onto that circle; editing the roster replaces the slots
//! wholesale while the cursor survives, clamped into the new range.

use chrono::NaiveDateTime;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::chore::{AllocationRepository, QueueSlotRepository, TaskRepository},
    error::Error,
};

/// A task together with its full rotation state.
pub struct ChoreState {
    pub task: entity::chore_task::Model,
    pub allocation: entity::chore_allocation::Model,
    pub slots: Vec<entity::chore_queue_slot::Model>,
}

/// Maps an arbitrary requested position onto the 1-indexed rotation circle.
///
/// Single-occupant rotations never move. For larger rosters the result is
/// `((requested - 1) mod roster_size) + 1` with Euclidean remainder, so any
/// integer input lands in `[1, roster_size]`.
pub fn cycle_position(requested: i32, roster_size: i32) -> i32 {
    debug_assert!(roster_size >= 1);

    if roster_size == 1 {
        return 1;
    }

    (requested - 1).rem_euclid(roster_size) + 1
}

pub struct RotationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RotationService<'a> {
    /// Creates a new instance of [`RotationService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a task, its allocation (cursor at 1), and one queue slot per
    /// roster member, numbered 1..N in input order. All-or-nothing.
    ///
    /// The roster entries are resident-in-apartment ids; their validity is the
    /// caller's responsibility (the membership layer owns that invariant).
    pub async fn create_task(
        &self,
        description: String,
        starts_at: NaiveDateTime,
        interval_days: i32,
        roster: &[i32],
    ) -> Result<ChoreState, Error> {
        if roster.is_empty() {
            return Err(Error::InvalidRequest("roster must not be empty".to_string()));
        }

        let txn = self.db.begin().await?;

        let task = TaskRepository::new(&txn).create(description).await?;
        let allocation = AllocationRepository::new(&txn)
            .create(task.id, starts_at, interval_days)
            .await?;

        let slot_repo = QueueSlotRepository::new(&txn);
        slot_repo.create_many(allocation.id, roster).await?;
        let slots = slot_repo.get_for_allocation(allocation.id).await?;

        txn.commit().await?;

        Ok(ChoreState {
            task,
            allocation,
            slots,
        })
    }

    /// Replaces every queue slot of the task's allocation with a new roster
    /// numbered 1..len, atomically.
    ///
    /// The cursor deliberately survives the edit (the current turn belongs to
    /// a slot number, not a person), but is clamped into `[1, new_len]` so the
    /// position invariant holds even when the roster shrinks.
    pub async fn replace_roster(&self, task_id: i32, roster: &[i32]) -> Result<ChoreState, Error> {
        if roster.is_empty() {
            return Err(Error::InvalidRequest("roster must not be empty".to_string()));
        }

        let txn = self.db.begin().await?;

        let task = TaskRepository::new(&txn)
            .get(task_id)
            .await?
            .ok_or(Error::NotFound("chore"))?;
        let allocation_repo = AllocationRepository::new(&txn);
        let mut allocation = allocation_repo
            .get_by_task_id(task_id)
            .await?
            .ok_or(Error::NotFound("chore allocation"))?;

        let slot_repo = QueueSlotRepository::new(&txn);
        slot_repo.delete_for_allocation(allocation.id).await?;
        slot_repo.create_many(allocation.id, roster).await?;

        let clamped = allocation.current_position.clamp(1, roster.len() as i32);
        if clamped != allocation.current_position {
            allocation_repo.set_position(allocation.id, clamped).await?;
            allocation.current_position = clamped;
        }

        let slots = slot_repo.get_for_allocation(allocation.id).await?;

        txn.commit().await?;

        Ok(ChoreState {
            task,
            allocation,
            slots,
        })
    }

    /// Moves the cursor to `cycle_position(requested, roster_size)` and
    /// persists it, returning the new position.
    ///
    /// Idempotent for a given `(requested, roster_size)` pair. An allocation
    /// with zero slots is an invariant violation and reported as not found
    /// rather than risking a division by zero. Count and write share one
    /// transaction so a concurrent roster edit cannot slip between them and
    /// strand the cursor out of range.
    pub async fn advance_cycle(&self, task_id: i32, requested: i32) -> Result<i32, Error> {
        let txn = self.db.begin().await?;

        let allocation = AllocationRepository::new(&txn)
            .get_by_task_id(task_id)
            .await?
            .ok_or(Error::NotFound("chore"))?;

        let roster_size = QueueSlotRepository::new(&txn).count(allocation.id).await? as i32;
        if roster_size == 0 {
            return Err(Error::NotFound("chore roster"));
        }

        let position = cycle_position(requested, roster_size);

        AllocationRepository::new(&txn)
            .set_position(allocation.id, position)
            .await?;

        txn.commit().await?;

        Ok(position)
    }

    /// The queue slot whose number equals the allocation's current position.
    pub async fn current_assignee(
        &self,
        task_id: i32,
    ) -> Result<entity::chore_queue_slot::Model, Error> {
        let allocation = AllocationRepository::new(self.db)
            .get_by_task_id(task_id)
            .await?
            .ok_or(Error::NotFound("chore"))?;

        QueueSlotRepository::new(self.db)
            .get_by_position(allocation.id, allocation.current_position)
            .await?
            .ok_or(Error::NotFound("queue slot"))
    }

    /// Deletes queue slots, then the allocation, then the task, atomically.
    ///
    /// Missing slots or a missing allocation are logged and skipped; only the
    /// absence of the task itself is the caller-visible failure.
    pub async fn delete_task(&self, task_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let deleted_tasks = delete_rotation_rows(&txn, task_id).await?;
        if deleted_tasks == 0 {
            return Err(Error::NotFound("chore"));
        }

        txn.commit().await?;

        Ok(())
    }

    /// Updates a task's description.
    pub async fn update_description(
        &self,
        task_id: i32,
        description: String,
    ) -> Result<entity::chore_task::Model, Error> {
        let task_repo = TaskRepository::new(self.db);

        let result = task_repo.update_description(task_id, description).await?;
        if result.rows_affected == 0 {
            return Err(Error::NotFound("chore"));
        }

        task_repo.get(task_id).await?.ok_or(Error::NotFound("chore"))
    }

    /// Fetches a task with its complete rotation state.
    pub async fn get_state(&self, task_id: i32) -> Result<ChoreState, Error> {
        let task = TaskRepository::new(self.db)
            .get(task_id)
            .await?
            .ok_or(Error::NotFound("chore"))?;
        let allocation = AllocationRepository::new(self.db)
            .get_by_task_id(task_id)
            .await?
            .ok_or(Error::NotFound("chore allocation"))?;
        let slots = QueueSlotRepository::new(self.db)
            .get_for_allocation(allocation.id)
            .await?;

        Ok(ChoreState {
            task,
            allocation,
            slots,
        })
    }
}

/// Deletes a task's queue slots, allocation, and the task row itself on the
/// given connection, in that dependency order.
///
/// Returns the number of task rows deleted; missing slots or a missing
/// allocation are logged and skipped. Callers own transaction scoping.
pub async fn delete_rotation_rows<C: ConnectionTrait>(
    conn: &C,
    task_id: i32,
) -> Result<u64, Error> {
    match AllocationRepository::new(conn).get_by_task_id(task_id).await? {
        Some(allocation) => {
            let deleted = QueueSlotRepository::new(conn)
                .delete_for_allocation(allocation.id)
                .await?;
            if deleted.rows_affected == 0 {
                tracing::warn!(task_id, "chore had no queue slots to delete");
            }

            AllocationRepository::new(conn).delete(allocation.id).await?;
        }
        None => tracing::warn!(task_id, "chore had no allocation to delete"),
    }

    let result = TaskRepository::new(conn).delete(task_id).await?;

    Ok(result.rows_affected)
}

/// Removes a departing member from every rotation they occupy, keeping the
/// dense-slot invariant intact.
///
/// Surviving slots are renumbered to 1..N in their existing order and the
/// cursor is clamped into the new range. A rotation left with no slots has no
/// one to assign, so its task is removed outright. Callers own transaction
/// scoping.
pub async fn remove_member_from_rotations<C: ConnectionTrait>(
    conn: &C,
    member_id: i32,
) -> Result<(), Error> {
    let slot_repo = QueueSlotRepository::new(conn);
    let allocation_repo = AllocationRepository::new(conn);

    for occupied in slot_repo.get_for_member(member_id).await? {
        slot_repo.delete(occupied.id).await?;

        let allocation = match allocation_repo.get(occupied.allocation_id).await? {
            Some(allocation) => allocation,
            None => {
                tracing::warn!(slot_id = occupied.id, "queue slot had no allocation");
                continue;
            }
        };

        let remaining = slot_repo.get_for_allocation(allocation.id).await?;
        if remaining.is_empty() {
            tracing::info!(
                task_id = allocation.task_id,
                "removing chore left without a roster"
            );
            allocation_repo.delete(allocation.id).await?;
            TaskRepository::new(conn).delete(allocation.task_id).await?;
            continue;
        }

        // Renumbering in ascending order only ever moves a slot downward into
        // a vacated position, so the unique (allocation, position) index holds
        // throughout.
        for (index, slot) in remaining.iter().enumerate() {
            let position = index as i32 + 1;
            if slot.position != position {
                slot_repo.set_slot_position(slot.id, position).await?;
            }
        }

        let clamped = allocation.current_position.clamp(1, remaining.len() as i32);
        if clamped != allocation.current_position {
            allocation_repo.set_position(allocation.id, clamped).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use sea_orm::DatabaseConnection;

    use super::{cycle_position, ChoreState, RotationService};
    use crate::server::{error::Error, util::test::{seed_apartment_with_members, setup_db}};

    fn start() -> NaiveDateTime {
        "2026-01-05T18:00:00".parse().unwrap()
    }

    async fn create_chore(
        db: &DatabaseConnection,
        roster: &[i32],
    ) -> Result<ChoreState, Error> {
        RotationService::new(db)
            .create_task("Take out trash".to_string(), start(), 7, roster)
            .await
    }

    mod cycle_position_tests {
        use super::cycle_position;

        /// For n >= 2 the result is always the canonical 1-indexed modulus.
        #[test]
        fn matches_canonical_formula() {
            for n in 2..=7 {
                for r in -20..=20 {
                    let result = cycle_position(r, n);

                    assert!((1..=n).contains(&result), "r={} n={} -> {}", r, n, result);
                    assert_eq!(result, (r - 1).rem_euclid(n) + 1);
                }
            }
        }

        /// A multiple of the roster size wraps to the roster size, never 0.
        #[test]
        fn zero_remainder_maps_to_roster_size() {
            assert_eq!(cycle_position(3, 3), 3);
            assert_eq!(cycle_position(6, 3), 3);
            assert_eq!(cycle_position(4, 2), 2);
        }

        /// Single-occupant rotations never move.
        #[test]
        fn single_member_roster_pins_position_to_one() {
            for r in [-5, 0, 1, 2, 99] {
                assert_eq!(cycle_position(r, 1), 1);
            }
        }
    }

    mod create_task_tests {
        use super::*;

        /// Slots come back numbered exactly 1..N in input order.
        #[tokio::test]
        async fn slots_are_dense_and_in_input_order() -> Result<(), Error> {
            let db = setup_db().await?;
            let (_, members) = seed_apartment_with_members(&db, 4).await?;
            let roster = vec![members[2], members[0], members[3], members[1]];

            let chore = create_chore(&db, &roster).await?;

            assert_eq!(chore.allocation.current_position, 1);
            let positions: Vec<i32> = chore.slots.iter().map(|s| s.position).collect();
            assert_eq!(positions, vec![1, 2, 3, 4]);
            let occupants: Vec<i32> = chore.slots.iter().map(|s| s.member_id).collect();
            assert_eq!(occupants, roster);

            Ok(())
        }

        #[tokio::test]
        async fn empty_roster_is_rejected() -> Result<(), Error> {
            let db = setup_db().await?;

            let result = create_chore(&db, &[]).await;

            assert!(matches!(result, Err(Error::InvalidRequest(_))));

            Ok(())
        }
    }

    mod advance_cycle_tests {
        use super::*;

        /// CreateTask(roster=[A,B,C]) then AdvanceCycle(4) lands on position 1,
        /// and the current assignee is A.
        #[tokio::test]
        async fn wraps_around_a_three_member_roster() -> Result<(), Error> {
            let db = setup_db().await?;
            let (_, members) = seed_apartment_with_members(&db, 3).await?;
            let chore = create_chore(&db, &members).await?;
            let service = RotationService::new(&db);

            let position = service.advance_cycle(chore.task.id, 4).await?;

            assert_eq!(position, 1);
            let assignee = service.current_assignee(chore.task.id).await?;
            assert_eq!(assignee.member_id, members[0]);

            Ok(())
        }

        /// A single-member rotation stays at 1 for every requested position.
        #[tokio::test]
        async fn single_member_rotation_never_moves() -> Result<(), Error> {
            let db = setup_db().await?;
            let (_, members) = seed_apartment_with_members(&db, 1).await?;
            let chore = create_chore(&db, &members).await?;
            let service = RotationService::new(&db);

            for requested in [1, 2, 99] {
                let position = service.advance_cycle(chore.task.id, requested).await?;
                assert_eq!(position, 1);

                let assignee = service.current_assignee(chore.task.id).await?;
                assert_eq!(assignee.member_id, members[0]);
            }

            Ok(())
        }

        /// The persisted position is what a later read observes.
        #[tokio::test]
        async fn persists_the_new_position() -> Result<(), Error> {
            let db = setup_db().await?;
            let (_, members) = seed_apartment_with_members(&db, 3).await?;
            let chore = create_chore(&db, &members).await?;
            let service = RotationService::new(&db);

            service.advance_cycle(chore.task.id, 2).await?;

            let state = service.get_state(chore.task.id).await?;
            assert_eq!(state.allocation.current_position, 2);
            let assignee = service.current_assignee(chore.task.id).await?;
            assert_eq!(assignee.member_id, members[1]);

            Ok(())
        }

        #[tokio::test]
        async fn unknown_task_is_not_found() -> Result<(), Error> {
            let db = setup_db().await?;
            let service = RotationService::new(&db);

            let result = service.advance_cycle(999, 1).await;

            assert!(matches!(result, Err(Error::NotFound(_))));

            Ok(())
        }
    }

    mod replace_roster_tests {
        use super::*;

        /// Shrinking the roster below the cursor clamps the cursor: size 5 at
        /// position 5 replaced with size 3 ends at position 3, and the
        /// assignee lookup resolves to the new roster's 3rd member.
        #[tokio::test]
        async fn shrinking_roster_clamps_cursor() -> Result<(), Error> {
            let db = setup_db().await?;
            let (_, members) = seed_apartment_with_members(&db, 5).await?;
            let chore = create_chore(&db, &members).await?;
            let service = RotationService::new(&db);

            service.advance_cycle(chore.task.id, 5).await?;

            let new_roster = vec![members[1], members[4], members[0]];
            let state = service.replace_roster(chore.task.id, &new_roster).await?;

            assert_eq!(state.allocation.current_position, 3);
            let assignee = service.current_assignee(chore.task.id).await?;
            assert_eq!(assignee.member_id, members[0]);

            Ok(())
        }

        /// A roster edit that keeps the cursor in range leaves it untouched.
        #[tokio::test]
        async fn cursor_survives_same_size_replacement() -> Result<(), Error> {
            let db = setup_db().await?;
            let (_, members) = seed_apartment_with_members(&db, 3).await?;
            let chore = create_chore(&db, &members).await?;
            let service = RotationService::new(&db);

            service.advance_cycle(chore.task.id, 2).await?;

            let new_roster = vec![members[2], members[1], members[0]];
            let state = service.replace_roster(chore.task.id, &new_roster).await?;

            assert_eq!(state.allocation.current_position, 2);
            // Same slot number, different occupant
            let assignee = service.current_assignee(chore.task.id).await?;
            assert_eq!(assignee.member_id, members[1]);

            Ok(())
        }

        /// The replacement slots are dense 1..N in the new input order.
        #[tokio::test]
        async fn new_slots_are_dense_and_ordered() -> Result<(), Error> {
            let db = setup_db().await?;
            let (_, members) = seed_apartment_with_members(&db, 3).await?;
            let chore = create_chore(&db, &members).await?;
            let service = RotationService::new(&db);

            let new_roster = vec![members[2], members[0]];
            let state = service.replace_roster(chore.task.id, &new_roster).await?;

            let positions: Vec<i32> = state.slots.iter().map(|s| s.position).collect();
            assert_eq!(positions, vec![1, 2]);
            let occupants: Vec<i32> = state.slots.iter().map(|s| s.member_id).collect();
            assert_eq!(occupants, new_roster);

            Ok(())
        }

        #[tokio::test]
        async fn empty_roster_is_rejected() -> Result<(), Error> {
            let db = setup_db().await?;
            let (_, members) = seed_apartment_with_members(&db, 2).await?;
            let chore = create_chore(&db, &members).await?;

            let result = RotationService::new(&db)
                .replace_roster(chore.task.id, &[])
                .await;

            assert!(matches!(result, Err(Error::InvalidRequest(_))));

            Ok(())
        }

        #[tokio::test]
        async fn unknown_task_is_not_found() -> Result<(), Error> {
            let db = setup_db().await?;
            let (_, members) = seed_apartment_with_members(&db, 2).await?;

            let result = RotationService::new(&db).replace_roster(999, &members).await;

            assert!(matches!(result, Err(Error::NotFound(_))));

            Ok(())
        }
    }

    mod delete_task_tests {
        use super::*;
        use sea_orm::{EntityTrait, PaginatorTrait};

        /// Deleting a chore with 3 slots removes the slots, the allocation,
        /// and the task; the assignee lookup then fails with NotFound.
        #[tokio::test]
        async fn removes_slots_allocation_and_task() -> Result<(), Error> {
            let db = setup_db().await?;
            let (_, members) = seed_apartment_with_members(&db, 3).await?;
            let chore = create_chore(&db, &members).await?;
            let service = RotationService::new(&db);

            service.delete_task(chore.task.id).await?;

            assert_eq!(entity::prelude::ChoreQueueSlot::find().count(&db).await?, 0);
            assert_eq!(entity::prelude::ChoreAllocation::find().count(&db).await?, 0);
            assert_eq!(entity::prelude::ChoreTask::find().count(&db).await?, 0);

            let result = service.current_assignee(chore.task.id).await;
            assert!(matches!(result, Err(Error::NotFound(_))));

            Ok(())
        }

        #[tokio::test]
        async fn unknown_task_is_not_found() -> Result<(), Error> {
            let db = setup_db().await?;

            let result = RotationService::new(&db).delete_task(999).await;

            assert!(matches!(result, Err(Error::NotFound(_))));

            Ok(())
        }

        /// Deleting one chore leaves an unrelated chore's rotation intact.
        #[tokio::test]
        async fn leaves_other_chores_untouched() -> Result<(), Error> {
            let db = setup_db().await?;
            let (_, members) = seed_apartment_with_members(&db, 2).await?;
            let doomed = create_chore(&db, &members).await?;
            let kept = create_chore(&db, &members).await?;
            let service = RotationService::new(&db);

            service.delete_task(doomed.task.id).await?;

            let state = service.get_state(kept.task.id).await?;
            assert_eq!(state.slots.len(), 2);

            Ok(())
        }
    }

    mod update_description_tests {
        use super::*;

        #[tokio::test]
        async fn updates_existing_task() -> Result<(), Error> {
            let db = setup_db().await?;
            let (_, members) = seed_apartment_with_members(&db, 2).await?;
            let chore = create_chore(&db, &members).await?;

            let task = RotationService::new(&db)
                .update_description(chore.task.id, "Water the plants".to_string())
                .await?;

            assert_eq!(task.description, "Water the plants");

            Ok(())
        }

        #[tokio::test]
        async fn unknown_task_is_not_found() -> Result<(), Error> {
            let db = setup_db().await?;

            let result = RotationService::new(&db)
                .update_description(999, "Ghost chore".to_string())
                .await;

            assert!(matches!(result, Err(Error::NotFound(_))));

            Ok(())
        }
    }
}
