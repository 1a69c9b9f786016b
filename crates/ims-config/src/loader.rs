//! Configuration loading from file and environment sources.

use config::{Config, Environment, File, FileFormat};

use crate::error::ConfigError;
use crate::settings::GatewayConfig;

/// Loads configuration from an optional TOML file plus `IMS__*` environment
/// overrides.
///
/// The file is optional so a container can run on environment variables
/// alone. Environment keys use `__` as the section separator, e.g.
/// `IMS__SECURITY__SECRET_KEY` maps to `security.secret_key`.
pub fn load_config(path: Option<&str>) -> Result<GatewayConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(
            File::with_name(path)
                .format(FileFormat::Toml)
                .required(false),
        );
    }

    builder = builder.add_source(Environment::with_prefix("IMS").separator("__"));

    let cfg: GatewayConfig = builder.build()?.try_deserialize()?;
    cfg.validate()?;

    tracing::debug!(
        routes = cfg.routes.len(),
        issuer = %cfg.security.issuer,
        "Configuration loaded"
    );

    Ok(cfg)
}
