//! # Ser Recicla Interfaces
//!
//! Repository traits shared between the storage implementation and the HTTP
//! layer. Handlers only see these traits, so the store can be swapped for an
//! in-memory double in tests.

pub mod database;

pub use database::{DatabaseError, DeliveryRepository, Repository, RepositoryFactory, UserRepository};
