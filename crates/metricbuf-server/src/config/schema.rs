use std::net::{IpAddr, SocketAddr};

use metricbuf_core::error::{MetricBufError, Result};
use metricbuf_core::DEFAULT_CAPACITY;
use serde::Deserialize;

const MAX_BODY_BYTES_LIMIT: usize = 16 * 1024 * 1024;
const MAX_CAPACITY: usize = 1_000_000;
const MAX_DRAIN_GRACE_MS: u64 = 60_000;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub buffer: BufferSection,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            buffer: BufferSection::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricBufError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.buffer.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Time between reporting draining on `/readyz` and closing the listener.
    #[serde(default = "default_drain_grace_ms")]
    pub drain_grace_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            drain_grace_ms: default_drain_grace_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.host
            .parse::<IpAddr>()
            .map_err(|_| MetricBufError::BadRequest("server.host must be an IP address".into()))?;
        if self.port == 0 {
            return Err(MetricBufError::BadRequest("server.port must not be 0".into()));
        }
        if !(1..=MAX_BODY_BYTES_LIMIT).contains(&self.max_body_bytes) {
            return Err(MetricBufError::BadRequest(format!(
                "server.max_body_bytes must be between 1 and {MAX_BODY_BYTES_LIMIT}"
            )));
        }
        if self.drain_grace_ms > MAX_DRAIN_GRACE_MS {
            return Err(MetricBufError::BadRequest(format!(
                "server.drain_grace_ms must be at most {MAX_DRAIN_GRACE_MS}"
            )));
        }
        Ok(())
    }

    /// Address to bind. Call after `validate`.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| MetricBufError::BadRequest(format!("server.host: {e}")))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    5000
}
fn default_max_body_bytes() -> usize {
    64 * 1024
}
fn default_drain_grace_ms() -> u64 {
    2000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BufferSection {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for BufferSection {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl BufferSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(MetricBufError::BadRequest(format!(
                "buffer.capacity must be between 1 and {MAX_CAPACITY}"
            )));
        }
        Ok(())
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}
