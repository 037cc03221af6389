//! # Models
//!
//! Plain records and the owned state that holds them.

pub mod app_state;
pub mod post;
pub mod user;

pub use app_state::{AppState, UNKNOWN_USER};
pub use post::{Post, PostFields, PostKey};
pub use user::User;
