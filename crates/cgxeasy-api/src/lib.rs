// cgxeasy-api: Async Rust client for the CloudGenix SD-WAN controller REST API

pub mod error;
pub mod rest;
pub mod transport;

pub use error::{DUPLICATE_LINK_CODE, Error};
pub use rest::CgxClient;
pub use rest::models;
pub use transport::{DEFAULT_CONTROLLER_URL, TlsMode, TransportConfig};
