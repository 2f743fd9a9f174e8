pub mod first_login;
pub mod invite;
pub mod retrieve;

pub use first_login::first_login;
pub use invite::{invite, InviteOutcome};
pub use retrieve::retrieve;
