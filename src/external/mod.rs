//! External collaborators reached over HTTP.

pub mod client;
pub mod zapi;
