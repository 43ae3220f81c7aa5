//! HTTP transport: the only I/O boundary of the client.

mod client;

pub use client::{ApiRequest, HttpClient, Transport, build_http_client};

#[cfg(test)]
pub use client::MockTransport;
