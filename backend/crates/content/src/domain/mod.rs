//! Domain Layer
//!
//! Entities, value objects and the persistence port.

pub mod entities;
pub mod repository;
pub mod value_objects;
