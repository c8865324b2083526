//! Key/value picklist entries.

pub mod model;

pub use model::KeyValue;
