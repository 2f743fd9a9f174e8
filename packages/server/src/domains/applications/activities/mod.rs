pub mod create;
pub mod review;
pub mod submit;
pub mod transition;

pub use create::{create_application, ContactInput, NewApplication};
pub use review::{approve, begin_review, reject, withdraw};
pub use submit::{send_confirmation_email, submit_application};
