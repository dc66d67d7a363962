//! Repositories for the chore rotation tables: the task definition, its
//! allocation (rotation state), and the allocation's ordered queue slots.

pub mod allocation;
pub mod queue_slot;
pub mod task;

pub use allocation::AllocationRepository;
pub use queue_slot::QueueSlotRepository;
pub use task::TaskRepository;
