//! Typed configuration sections.
//!
//! Defaults mirror the reference deployment: nine backend services behind
//! the gateway, HS256 tokens with a 30 minute TTL, 30 second proxy deadline.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Issuer claim stamped into every token minted by the auth service.
///
/// Validators treat a differing `iss` as invalid even when the signature
/// verifies, so tokens from another trust domain cannot be replayed here.
pub const DEFAULT_TOKEN_ISSUER: &str = "ims-auth-service";

/// Root configuration for a gateway or service process.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Shared trust anchor: token secret, issuer, TTL, admin credentials.
    #[serde(default)]
    pub security: SecurityConfig,

    /// Reverse-proxy forwarding settings.
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Fire-and-forget workflow notifier settings.
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// CORS settings for browser clients.
    #[serde(default)]
    pub cors: CorsConfig,

    /// Static route table mapping path prefixes to backend base URLs.
    #[serde(default = "RouteConfig::default_routes")]
    pub routes: Vec<RouteConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            security: SecurityConfig::default(),
            proxy: ProxyConfig::default(),
            workflow: WorkflowConfig::default(),
            logging: LoggingConfig::default(),
            cors: CorsConfig::default(),
            routes: RouteConfig::default_routes(),
        }
    }
}

impl GatewayConfig {
    /// Validates cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.secret_key.is_empty() {
            return Err(ConfigError::invalid("security.secret_key must not be empty"));
        }
        for origin in &self.cors.origins {
            url::Url::parse(origin).map_err(|e| {
                ConfigError::invalid(format!("invalid CORS origin '{origin}': {e}"))
            })?;
        }
        for route in &self.routes {
            if !route.prefix.starts_with('/') {
                return Err(ConfigError::invalid(format!(
                    "route prefix must start with '/': {}",
                    route.prefix
                )));
            }
            url::Url::parse(&route.upstream).map_err(|e| {
                ConfigError::invalid(format!("invalid upstream '{}': {e}", route.upstream))
            })?;
            if route.upstream.ends_with('/') {
                return Err(ConfigError::invalid(format!(
                    "upstream must not end with '/': {}",
                    route.upstream
                )));
            }
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind host.
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl ServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8000
    }

    /// Returns the bind address as `host:port`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

/// Shared trust anchor injected identically into every service process.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecurityConfig {
    /// Symmetric signing secret shared by all services.
    #[serde(default)]
    pub secret_key: String,

    /// Issuer claim stamped into minted tokens and checked during
    /// validation when present.
    #[serde(default = "SecurityConfig::default_issuer")]
    pub issuer: String,

    /// Token lifetime; expiry is the only invalidation mechanism.
    #[serde(with = "humantime_serde", default = "SecurityConfig::default_token_ttl")]
    pub token_ttl: Duration,

    /// Statically configured admin username.
    #[serde(default = "SecurityConfig::default_admin_username")]
    pub admin_username: String,

    /// Statically configured admin password.
    #[serde(default)]
    pub admin_password: String,
}

impl SecurityConfig {
    fn default_issuer() -> String {
        DEFAULT_TOKEN_ISSUER.to_string()
    }

    fn default_token_ttl() -> Duration {
        Duration::from_secs(30 * 60)
    }

    fn default_admin_username() -> String {
        "admin".to_string()
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            issuer: Self::default_issuer(),
            token_ttl: Self::default_token_ttl(),
            admin_username: Self::default_admin_username(),
            admin_password: String::new(),
        }
    }
}

/// Reverse-proxy forwarding settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyConfig {
    /// Single fixed deadline for the whole outbound call.
    #[serde(with = "humantime_serde", default = "ProxyConfig::default_timeout")]
    pub timeout: Duration,
}

impl ProxyConfig {
    fn default_timeout() -> Duration {
        Duration::from_secs(30)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            timeout: Self::default_timeout(),
        }
    }
}

/// Fire-and-forget workflow notifier settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowConfig {
    /// Gateway base URL used for the callback to the workflow service.
    #[serde(default = "WorkflowConfig::default_gateway_url")]
    pub gateway_url: String,

    /// Deadline for a single notification delivery attempt.
    #[serde(with = "humantime_serde", default = "WorkflowConfig::default_timeout")]
    pub timeout: Duration,
}

impl WorkflowConfig {
    fn default_gateway_url() -> String {
        "http://api-gateway:8000".to_string()
    }

    fn default_timeout() -> Duration {
        Duration::from_secs(5)
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            gateway_url: Self::default_gateway_url(),
            timeout: Self::default_timeout(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default level filter when `RUST_LOG` is unset.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// CORS settings for browser clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins.
    #[serde(default = "CorsConfig::default_origins")]
    pub origins: Vec<String>,
}

impl CorsConfig {
    fn default_origins() -> Vec<String> {
        vec!["http://localhost:3000".to_string()]
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: Self::default_origins(),
        }
    }
}

/// One entry in the static route table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// Literal path prefix, e.g. `/api/v1/patients`.
    pub prefix: String,

    /// Backend base URL without a trailing slash.
    pub upstream: String,
}

impl RouteConfig {
    /// Creates a route entry.
    #[must_use]
    pub fn new(prefix: impl Into<String>, upstream: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            upstream: upstream.into(),
        }
    }

    /// The reference deployment's route table, one entry per business
    /// capability.
    #[must_use]
    pub fn default_routes() -> Vec<Self> {
        vec![
            Self::new("/api/v1/auth", "http://auth-service:5001"),
            Self::new("/api/v1/users", "http://user-service:5002"),
            Self::new("/api/v1/patients", "http://patient-service:5003"),
            Self::new("/api/v1/medical-staff", "http://medical-staff-service:5004"),
            Self::new("/api/v1/medical-images", "http://medical-image-service:5005"),
            Self::new("/api/v1/medical-tests", "http://medical-test-service:5009"),
            Self::new(
                "/api/v1/diagnostic-reports",
                "http://diagnostic-report-service:5006",
            ),
            Self::new("/api/v1/billing", "http://billing-service:5007"),
            Self::new("/api/v1/workflow", "http://workflow-service:5008"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = GatewayConfig::default();
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:8000");
        assert_eq!(cfg.security.issuer, "ims-auth-service");
        assert_eq!(cfg.security.token_ttl, Duration::from_secs(1800));
        assert_eq!(cfg.proxy.timeout, Duration::from_secs(30));
        assert_eq!(cfg.workflow.timeout, Duration::from_secs(5));
        assert_eq!(cfg.routes.len(), 9);
    }

    #[test]
    fn validate_rejects_empty_secret() {
        let cfg = GatewayConfig::default();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn validate_rejects_unparseable_cors_origin() {
        let mut cfg = GatewayConfig::default();
        cfg.security.secret_key = "test-secret".into();
        cfg.cors.origins.push("http//typo.example.com".into());
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn validate_rejects_bad_prefix() {
        let mut cfg = GatewayConfig::default();
        cfg.security.secret_key = "test-secret".into();
        cfg.routes
            .push(RouteConfig::new("api/v1/broken", "http://svc:1"));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_trailing_slash_upstream() {
        let mut cfg = GatewayConfig::default();
        cfg.security.secret_key = "test-secret".into();
        cfg.routes
            .push(RouteConfig::new("/api/v1/x", "http://svc:1/"));
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_accepts_defaults_with_secret() {
        let mut cfg = GatewayConfig::default();
        cfg.security.secret_key = "test-secret".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn toml_sections_deserialize() {
        let cfg: GatewayConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [security]
            secret_key = "s3cret"
            token_ttl = "15m"

            [proxy]
            timeout = "10s"

            [[routes]]
            prefix = "/api/v1/auth"
            upstream = "http://localhost:5001"
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.security.token_ttl, Duration::from_secs(900));
        assert_eq!(cfg.proxy.timeout, Duration::from_secs(10));
        assert_eq!(cfg.routes.len(), 1);
        assert!(cfg.validate().is_ok());
    }
}
