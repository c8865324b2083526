//! Session token lifecycle: login, principal resolution, refresh, logout.

pub mod login;
pub mod manager;

pub use login::LoginService;
pub use manager::{STORAGE_KEY, SessionTokenManager};
