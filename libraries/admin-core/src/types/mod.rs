//! Domain types for the user admin panel

mod ids;
mod user;

pub use ids::UserId;
pub use user::{parse_age, Status, User, UserInput, UserPayload};
