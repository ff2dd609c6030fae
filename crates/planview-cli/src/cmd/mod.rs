pub mod config;
pub mod customers;
pub mod spaces;
pub mod sync;
