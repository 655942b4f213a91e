//! Wire shapes of the HTTP surface, shared by the servers and the clients.
mod request;
mod response;

pub use request::*;
pub use response::*;
