//! Gateway configuration, populated from environment variables.

use std::net::SocketAddr;

/// Runtime configuration for the gateway.
///
/// All fields are populated from environment variables with sensible
/// defaults, so an embedding binary can start with zero configuration.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `PINMESH_BIND` | `0.0.0.0:9094` | TCP socket address to listen on |
/// | `PINMESH_PEERNAME` | (absent) | Display name advertised in `/id` responses by the backing service |
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address the embedding server binds to.
    pub bind_addr: SocketAddr,

    /// Operator-chosen display name, forwarded to the backing service at
    /// startup by the embedding binary.
    pub peername: Option<String>,
}

impl GatewayConfig {
    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = std::env::var("PINMESH_BIND")
            .unwrap_or_else(|_| "0.0.0.0:9094".into())
            .parse()
            .expect("PINMESH_BIND must be a valid socket address (e.g. 0.0.0.0:9094)");

        Self {
            bind_addr,
            peername: std::env::var("PINMESH_PEERNAME").ok(),
        }
    }
}
