pub mod user;
pub mod user_domain_role;

pub use user::*;
pub use user_domain_role::*;
