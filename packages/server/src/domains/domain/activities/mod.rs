pub mod availability;

pub use availability::{check_availability, Availability};
