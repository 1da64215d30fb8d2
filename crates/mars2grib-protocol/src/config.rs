//! `MarsClientConfig::from_env` (§6 "Environment variables", §10.3 Configuration).
//!
//! Read once at encoder/client construction; a malformed environment is
//! reported through [`ConfigError`] rather than panicking.

use std::env;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarsClientConfig {
    pub callback_proxy: Option<(String, u16)>,
    pub passive_proxy: bool,
    pub odb_codes_dir: Option<String>,
}

impl MarsClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_reader(|var| env::var(var).ok())
    }

    /// Testable indirection over `std::env::var`, so unit tests don't have
    /// to mutate the process environment (§5 "only shared mutable state").
    pub fn from_reader(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get("MARS_CLIENT_CALLBACK_PROXY_HOST").filter(|s| !s.is_empty());
        let port = get("MARS_CLIENT_CALLBACK_PROXY_PORT");

        let callback_proxy = match (host, port) {
            (Some(host), Some(port)) => {
                let port: u16 = port.parse().map_err(|_| ConfigError::InvalidInt {
                    var: "MARS_CLIENT_CALLBACK_PROXY_PORT",
                    value: port.clone(),
                })?;
                Some((host, port))
            }
            (Some(_), None) => {
                return Err(ConfigError::ProxyHostWithoutPort {
                    proxy_host_var: "MARS_CLIENT_CALLBACK_PROXY_HOST",
                    proxy_port_var: "MARS_CLIENT_CALLBACK_PROXY_PORT",
                })
            }
            (None, _) => None,
        };

        let passive_proxy = match get("MARS_CLIENT_PASSIVE_PROXY") {
            None => false,
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidBool {
                var: "MARS_CLIENT_PASSIVE_PROXY",
                value: v,
            })?,
        };

        let odb_codes_dir = get("ODB_CODES");

        Ok(MarsClientConfig {
            callback_proxy,
            passive_proxy,
            odb_codes_dir,
        })
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}
