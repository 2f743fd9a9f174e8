// .gov Registrar - API Core
//
// Backend for .gov domain applications: the application lifecycle, WHOIS
// contact synchronization with the registry, and domain invitations.
// Business logic lives per-domain in domains/*; SQL lives only in models/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
