//! Edge API gateway for the IMS backend services.
//!
//! The gateway owns two things: an immutable longest-prefix routing table
//! built once at startup, and a reverse-proxy forwarder that reproduces each
//! inbound request against the selected backend and relays the response
//! unchanged in substance. Authorization is deliberately not enforced here;
//! every backend re-validates the bearer token itself against the shared
//! secret, so the gateway stays a pure traffic director.

pub mod error;
pub mod handler;
pub mod observability;
pub mod proxy;
pub mod routes;
pub mod server;

pub use error::GatewayError;
pub use proxy::ProxyClient;
pub use routes::{RouteTarget, RoutingTable};
pub use server::{AppState, Server, build_router};
