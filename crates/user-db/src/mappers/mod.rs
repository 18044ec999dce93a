//! Entity to model mappers
//!
//! - `From<UserModel> for UserRecord`: convert database rows to domain records
//! - `UserWrite`: borrow a record's persisted columns for insert/update

mod user;

pub use user::UserWrite;
