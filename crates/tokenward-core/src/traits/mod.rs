//! Core traits defined in `tokenward-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
