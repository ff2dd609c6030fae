pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod reconcile;
pub mod resolver;
pub mod select;
pub mod types;

#[cfg(test)]
mod testing;

pub use api::{ClickUpClient, TaskService};
pub use error::{PlanviewError, Result};
