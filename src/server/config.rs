//! Configuration for the REST server

use std::net::SocketAddr;

/// Address the server binds to when none is configured
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Configuration for the REST server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: SocketAddr,

    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_body_bytes: 16 * 1024,
        }
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Set the socket address to listen on
    pub fn bind(mut self, bind: SocketAddr) -> Self {
        self.config.bind = bind;
        self
    }

    /// Set the maximum accepted request body size
    pub fn max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.config.max_body_bytes = max_body_bytes;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ServerConfig {
        self.config
    }
}

impl ServerConfig {
    /// Create a new builder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_matches_constant() {
        let parsed: SocketAddr = DEFAULT_BIND.parse().unwrap();
        assert_eq!(ServerConfig::default().bind, parsed);
    }
}
