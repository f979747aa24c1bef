// beagle-api: Async HTTP transport for the beagle-wind game platform API

pub mod client;
pub mod error;
pub mod transport;

pub use client::HttpTransport;
pub use error::Error;
pub use transport::{TlsMode, Transport, TransportConfig};
