//! Delivery domain - zone and method configurations used at checkout

mod catalog;
mod entity;
mod repository;

pub use catalog::*;
pub use entity::*;
pub use repository::*;
