//! # tokenward-entity
//!
//! Domain records shared by the Tokenward crates. Every struct derives
//! `Debug`, `Clone`, `Serialize` and `Deserialize`.

pub mod keyvalue;
pub mod token;
pub mod user;
