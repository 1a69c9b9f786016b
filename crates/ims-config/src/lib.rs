//! Configuration management for the IMS edge and authorization core.
//!
//! Every service process receives the same trust anchor (shared token
//! secret, issuer string, TTL) through this crate, so token validation
//! behaves identically across process boundaries. The gateway additionally
//! loads its static route table and proxy settings here.
//!
//! Configuration is read from a TOML file and overridden by `IMS__*`
//! environment variables (e.g. `IMS__SECURITY__SECRET_KEY`).

pub mod error;
pub mod loader;
pub mod settings;

pub use error::ConfigError;
pub use loader::load_config;
pub use settings::{
    CorsConfig, GatewayConfig, LoggingConfig, ProxyConfig, RouteConfig, SecurityConfig,
    ServerConfig, WorkflowConfig,
};
