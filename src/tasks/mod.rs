//! Background Tasks Module
//!
//! Optional maintenance tasks that run alongside a built resource group.

mod purge;

pub use purge::spawn_purge_task;
