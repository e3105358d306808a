use std::collections::HashMap;
use std::time::Duration;

use http::HeaderMap;
use schemars::JsonSchema;
use serde::Deserialize;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}

/// Connection settings of a [`Transport`](crate::Transport).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, default)]
pub struct TransportConfig {
    /// Total time allowed for one HTTP exchange, in human-readable format; defaults to 30s
    #[serde(
        deserialize_with = "humantime_serde::deserialize",
        default = "default_timeout"
    )]
    #[schemars(with = "String", default = "default_timeout")]
    pub timeout: Duration,

    /// Time allowed to establish a connection; defaults to 10s
    #[serde(
        deserialize_with = "humantime_serde::deserialize",
        default = "default_connect_timeout"
    )]
    #[schemars(with = "String", default = "default_connect_timeout")]
    pub connect_timeout: Duration,

    /// Static headers sent with every request
    #[serde(with = "http_serde::header_map")]
    #[schemars(with = "HashMap<String, String>")]
    pub headers: HeaderMap,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            headers: HeaderMap::new(),
        }
    }
}
