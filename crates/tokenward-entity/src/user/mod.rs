//! Application user records.

pub mod model;

pub use model::ApplicationUser;
