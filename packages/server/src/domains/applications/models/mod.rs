pub mod application;
pub mod application_details;
pub mod draft_domain;
pub mod website;

pub use application::*;
pub use application_details::*;
pub use draft_domain::*;
pub use website::*;
