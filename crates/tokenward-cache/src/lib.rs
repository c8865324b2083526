//! # tokenward-cache
//!
//! Cache support for Tokenward:
//!
//! - **memory**: in-process [`CacheProvider`](tokenward_core::traits::CacheProvider)
//!   backed by [moka](https://crates.io/crates/moka) with per-entry TTL
//! - **list**: a cache-aside loader for small reference lists (picklists)
//!   with single-flight population and change notification
//!
//! The provider is selected at runtime from configuration through
//! [`CacheManager`].

pub mod keys;
pub mod list;
pub mod memory;
pub mod provider;

pub use list::{CachedList, ListSource};
pub use provider::CacheManager;
