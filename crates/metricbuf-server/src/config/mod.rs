//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use metricbuf_core::error::{MetricBufError, Result};

pub use schema::{BufferSection, ServerSection, ServiceConfig};

/// Config file looked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "metricbuf.yaml";

pub fn load_from_file(path: &str) -> Result<ServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricBufError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg: ServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricBufError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// An explicit path must exist. Without one, `metricbuf.yaml` is used when
/// present and built-in defaults otherwise.
pub fn load(path: Option<&str>) -> Result<ServiceConfig> {
    match path {
        Some(p) => load_from_file(p),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        None => {
            tracing::info!(path = DEFAULT_CONFIG_PATH, "no config file, using defaults");
            Ok(ServiceConfig::default())
        }
    }
}
