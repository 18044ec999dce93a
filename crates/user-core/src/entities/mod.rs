//! Domain entities - core business objects

mod session;
mod user;

pub use session::SessionSnapshot;
pub use user::{UserRecord, DEFAULT_ROLE};
