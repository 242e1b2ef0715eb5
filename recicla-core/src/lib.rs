//! Core domain models and types for Ser Recicla
//!
//! This crate contains the fundamental types used throughout the system:
//! waste categories, delivery records, users and the statistics reporter
//! that summarizes deliveries per waste type, unit and class. It has minimal
//! dependencies and defines the domain language of the application.

pub mod delivery;
pub mod error;
pub mod stats;
pub mod types;
pub mod user;

// Re-export commonly used types at the crate root
pub use delivery::{Delivery, DeliveryFilter, DeliveryListing, NewDelivery};
pub use error::{CoreError, Result};
pub use stats::{aggregate, AggregationResult, ClassTotal, StatsFilter, StatsPeriod, TOP_CLASSES_LIMIT};
pub use types::{Shift, WasteType};
pub use user::{NewUser, User, UserCredentials, UserSummary};
