//! Domain entities

pub mod session;
pub mod user;

pub use session::UserSession;
pub use user::User;
