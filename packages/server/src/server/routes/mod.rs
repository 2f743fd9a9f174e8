// HTTP routes
pub mod applications;
pub mod availability;
pub mod domains;
pub mod health;
pub mod invitations;

pub use applications::*;
pub use availability::*;
pub use domains::*;
pub use health::*;
pub use invitations::*;
