//! Issued token records.

pub mod pair;

pub use pair::TokenPair;
