pub mod auth;
pub mod deliveries;
pub mod health;
pub mod stats;

// Re-export handler functions
pub use auth::*;
pub use deliveries::*;
pub use health::*;
pub use stats::*;
