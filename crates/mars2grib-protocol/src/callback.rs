//! The call-back connection capability (§4.7 step 1, §9 "Runtime
//! polymorphism via class hierarchies").
//!
//! The source models `SimpleCallback` / `ProxyCallback` / `PassiveProxyCallback`
//! as a `BaseCallbackConnection` class hierarchy selected at construction by
//! `BaseCallbackConnection::build`. Re-expressed here as one tagged enum with
//! a single `connect` capability, selected the same way from
//! [`crate::config::MarsClientConfig`] rather than from a virtual dispatch
//! table (§9).

use tokio::net::{TcpListener, TcpStream};

use crate::config::MarsClientConfig;
use crate::error::ProtocolError;
use crate::wire;

/// How the client exposes an address for the server to call back on.
pub enum CallbackConnection {
    /// The client itself accepts inbound connections on an ephemeral port.
    Simple { listener: TcpListener, host: String, port: u16 },

    /// A proxy accepts on the client's behalf and forwards; the client still
    /// accepts locally, but advertises the proxy's externally-reachable
    /// address/port instead of its own.
    Proxy {
        listener: TcpListener,
        advertised_host: String,
        advertised_port: u16,
    },

    /// Passive mode: no local listener at all. The client dials the proxy's
    /// advertised passive address for every single call-back instead of
    /// accepting (§6 "$MARS_CLIENT_PASSIVE_PROXY").
    PassiveProxy {
        advertised_host: String,
        advertised_port: u16,
        passive_host: String,
        passive_port: u16,
        passive_check: u64,
    },
}

impl CallbackConnection {
    /// Build the call-back connection `config` selects: a direct listener
    /// when no proxy is configured, otherwise a proxy or passive-proxy
    /// control handshake (§6, source's `BaseCallbackConnection::build`).
    pub async fn build(config: &MarsClientConfig) -> Result<Self, ProtocolError> {
        match &config.callback_proxy {
            None => Self::simple().await,
            Some((proxy_host, proxy_port)) if config.passive_proxy => {
                Self::passive_proxy(proxy_host, *proxy_port).await
            }
            Some((proxy_host, proxy_port)) => Self::proxy(proxy_host, *proxy_port).await,
        }
    }

    pub async fn simple() -> Result<Self, ProtocolError> {
        let listener = TcpListener::bind(("0.0.0.0", 0))
            .await
            .map_err(|e| ProtocolError::io("callback-listener", e))?;
        let local = listener
            .local_addr()
            .map_err(|e| ProtocolError::io("callback-listener", e))?;
        Ok(CallbackConnection::Simple {
            listener,
            host: local.ip().to_string(),
            port: local.port(),
        })
    }

    /// Open the control connection to the proxy, advertise our local
    /// listener, and read back the address the proxy will advertise to the
    /// server in our place (source's `ProxyCallback` constructor).
    pub async fn proxy(proxy_host: &str, proxy_port: u16) -> Result<Self, ProtocolError> {
        let listener = TcpListener::bind(("0.0.0.0", 0))
            .await
            .map_err(|e| ProtocolError::io("callback-listener", e))?;
        let local = listener
            .local_addr()
            .map_err(|e| ProtocolError::io("callback-listener", e))?;

        let mut control = TcpStream::connect((proxy_host, proxy_port))
            .await
            .map_err(|e| ProtocolError::io("proxy-control", e))?;
        wire::write_string(&mut control, "proxy-control", &local.ip().to_string()).await?;
        wire::write_i32(&mut control, "proxy-control", local.port() as i32).await?;
        wire::write_bool(&mut control, "proxy-control", false).await?;

        let advertised_host = wire::read_string(&mut control, "proxy-control").await?;
        let advertised_port = wire::read_i32(&mut control, "proxy-control").await? as u16;

        Ok(CallbackConnection::Proxy {
            listener,
            advertised_host,
            advertised_port,
        })
    }

    /// Same control handshake as [`Self::proxy`], but additionally reads the
    /// passive dial-back address and a one-time check value, and never
    /// binds a local listener (source's `PassiveProxyCallback` constructor).
    pub async fn passive_proxy(proxy_host: &str, proxy_port: u16) -> Result<Self, ProtocolError> {
        let mut control = TcpStream::connect((proxy_host, proxy_port))
            .await
            .map_err(|e| ProtocolError::io("proxy-control", e))?;
        wire::write_string(&mut control, "proxy-control", "<invalid>").await?;
        wire::write_i32(&mut control, "proxy-control", -1).await?;
        wire::write_bool(&mut control, "proxy-control", true).await?;

        let advertised_host = wire::read_string(&mut control, "proxy-control").await?;
        let advertised_port = wire::read_i32(&mut control, "proxy-control").await? as u16;
        let passive_host = wire::read_string(&mut control, "proxy-control").await?;
        let passive_port = wire::read_i32(&mut control, "proxy-control").await? as u16;
        let passive_check = wire::read_u64(&mut control, "proxy-control").await?;

        Ok(CallbackConnection::PassiveProxy {
            advertised_host,
            advertised_port,
            passive_host,
            passive_port,
            passive_check,
        })
    }

    /// The host/port advertised to the server in the `MarsTask` frame.
    pub fn advertised(&self) -> (&str, u16) {
        match self {
            CallbackConnection::Simple { host, port, .. } => (host.as_str(), *port),
            CallbackConnection::Proxy {
                advertised_host,
                advertised_port,
                ..
            } => (advertised_host.as_str(), *advertised_port),
            CallbackConnection::PassiveProxy {
                advertised_host,
                advertised_port,
                ..
            } => (advertised_host.as_str(), *advertised_port),
        }
    }

    /// Obtain the socket for the *next* call-back (§4.7 step 4; the source's
    /// `wait()` loop re-accepts/re-dials once per call-back, not once per
    /// task).
    pub async fn connect(&self) -> Result<TcpStream, ProtocolError> {
        match self {
            CallbackConnection::Simple { listener, .. } | CallbackConnection::Proxy { listener, .. } => listener
                .accept()
                .await
                .map(|(stream, _)| stream)
                .map_err(|e| ProtocolError::io("callback-accept", e)),
            CallbackConnection::PassiveProxy {
                passive_host,
                passive_port,
                passive_check,
                ..
            } => {
                let mut stream = TcpStream::connect((passive_host.as_str(), *passive_port))
                    .await
                    .map_err(|e| ProtocolError::io("passive-dial", e))?;
                wire::write_u64(&mut stream, "passive-dial", *passive_check).await?;
                Ok(stream)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simple_advertises_its_bound_port() {
        let cb = CallbackConnection::simple().await.unwrap();
        let (_, port) = cb.advertised();
        assert_ne!(port, 0);
    }

    #[tokio::test]
    async fn simple_connect_accepts_a_real_peer() {
        let cb = CallbackConnection::simple().await.unwrap();
        let (host, port) = cb.advertised();
        let host = host.to_owned();

        let dial = tokio::spawn(async move {
            TcpStream::connect((host.as_str(), port)).await.unwrap();
        });

        let accepted = cb.connect().await;
        dial.await.unwrap();
        assert!(accepted.is_ok());
    }
}
