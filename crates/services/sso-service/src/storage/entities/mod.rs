//! SeaORM entities.

pub mod app;
pub mod user;
