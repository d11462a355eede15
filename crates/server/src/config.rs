use std::{env, fmt::Display, net::SocketAddr, str::FromStr, time::Duration};

use saco_catalog::ROOT_PREFIX;
use tracing::{info, warn};

/// Process configuration, read once from the environment at startup.
///
/// Storage credentials are not part of it: `aws-config` resolves them
/// through its default chain (`AWS_ACCESS_KEY_ID`, `AWS_SHARED_CREDENTIALS_FILE`,
/// profiles, instance metadata).
#[derive(Debug, Clone)]
pub struct Config {
    pub bucket: String,
    pub prefix: String,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
}

impl Config {
    pub fn load() -> Self {
        let port: u16 = try_load("PORT", "3000");
        let bind_addr = try_load("BIND_ADDR", &format!("0.0.0.0:{port}"));
        Self {
            bucket: try_load("BUCKET_NAME", "saco-designs"),
            prefix: try_load("STORAGE_PREFIX", ROOT_PREFIX),
            endpoint: optional("S3_ENDPOINT"),
            region: optional("S3_REGION"),
            bind_addr,
            request_timeout: Duration::from_secs(try_load("REQUEST_TIMEOUT_SECS", "30")),
        }
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = optional(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        parse_default(key, default)
    })
}

fn parse_default<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    match default.parse() {
        Ok(v) => v,
        Err(e) => panic!("built-in default for {key} does not parse: {e}"),
    }
}
