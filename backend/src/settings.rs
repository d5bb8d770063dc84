//! Server settings loaded via OrthoConfig.
//!
//! Values come from command-line flags, `WORKOUTS_*` environment variables or
//! a configuration file, in OrthoConfig's usual precedence order.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Listener settings for the workout log server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WORKOUTS")]
pub struct ServerSettings {
    /// Interface address to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
}

/// Raised when the configured host is not an IP address.
#[derive(Debug, thiserror::Error)]
#[error("invalid bind host '{host}': {source}")]
pub struct InvalidHostError {
    host: String,
    #[source]
    source: std::net::AddrParseError,
}

impl ServerSettings {
    /// Socket address to bind, defaulting to every interface.
    pub fn bind_addr(&self) -> Result<SocketAddr, InvalidHostError> {
        let ip = match self.host.as_deref() {
            None => DEFAULT_HOST,
            Some(host) => host.trim().parse().map_err(|source| InvalidHostError {
                host: host.to_owned(),
                source,
            })?,
        };
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("workout-log")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_bind_every_interface_on_8080() {
        let _guard = lock_env([
            ("WORKOUTS_HOST", None::<String>),
            ("WORKOUTS_PORT", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.host.is_none());
        assert_eq!(settings.port, 8080);
        assert_eq!(
            settings.bind_addr().expect("default address"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("WORKOUTS_HOST", Some("127.0.0.1".to_owned())),
            ("WORKOUTS_PORT", Some("9090".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("configured address"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
    }

    #[rstest]
    fn host_alone_keeps_the_default_port() {
        let _guard = lock_env([
            ("WORKOUTS_HOST", Some("127.0.0.1".to_owned())),
            ("WORKOUTS_PORT", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("configured address"),
            SocketAddr::from(([127, 0, 0, 1], 8080))
        );
    }

    #[rstest]
    fn hostnames_are_rejected() {
        let settings = ServerSettings {
            host: Some("localhost".to_owned()),
            port: 8080,
        };
        let err = settings.bind_addr().expect_err("hostname is not an IP");
        assert!(err.to_string().contains("localhost"));
    }
}
