//! `DHSProtocol`'s call-back wait loop (§4.7), re-expressed as an async
//! state machine over [`CallbackConnection`] and [`ClientTask`] rather than
//! a `BaseProtocol` subclass (§9).

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use mars2grib_core::MemDict;

use crate::callback::CallbackConnection;
use crate::config::MarsClientConfig;
use crate::error::ProtocolError;
use crate::task::ClientTask;
use crate::wire;

const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(30);

/// What the wait loop settled on for one `retrieve`/`archive` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `'o'`: transfer complete.
    Ok,
    /// `'r'`: the server asked for `total_bytes` to be uploaded by the caller.
    ReadRequested { total_bytes: u64 },
    /// `'w'`: the server is sending `bytes` bytes next.
    WriteIncoming { bytes: u64 },
}

/// A MARS control connection: the `host:port` the DHS protocol's server
/// listens on, named for diagnostics the way `DHSProtocol::name_` is
/// (§4.7, source's `DHSProtocol`).
pub struct DhsClient {
    pub name: String,
    pub host: String,
    pub port: u16,
    /// Mirrors `forward_`: whether in-band `'I'/'W'/'D'/'E'` log lines are
    /// additionally surfaced to a "user" channel. This crate only has
    /// `tracing`, so "forwarding" means emitting at `info!`/`warn!` in
    /// addition to the unconditional `debug!` every code gets (§10.1).
    pub forward_messages: bool,
}

impl DhsClient {
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16, forward_messages: bool) -> Self {
        DhsClient {
            name: name.into(),
            host: host.into(),
            port,
            forward_messages,
        }
    }

    /// Open the control connection, send the `ClientTask`, and wait for the
    /// single-byte acknowledgement (§4.7 steps 2-3).
    async fn handshake(&self, task: &ClientTask) -> Result<TcpStream, ProtocolError> {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        let mut control = timeout(HANDSHAKE_TIMEOUT, connect)
            .await
            .map_err(|_| ProtocolError::HandshakeTimeout {
                host: self.host.clone(),
                port: self.port,
            })?
            .map_err(|e| ProtocolError::io("control", e))?;

        task.send(&mut control).await?;

        let ack = wire::read_u8(&mut control, "control").await?;
        if ack != b'a' {
            return Err(ProtocolError::BadAcknowledgement { byte: ack });
        }

        Ok(control)
    }

    /// Retrieve: build a task against `request`/`environ`, complete the
    /// handshake, and drive the call-back wait loop to its first terminal
    /// outcome (§4.7, source's `DHSProtocol::retrieve`).
    pub async fn retrieve(
        &self,
        request: MemDict,
        environ: MemDict,
        config: &MarsClientConfig,
    ) -> Result<Outcome, ProtocolError> {
        let callback = CallbackConnection::build(config).await?;
        let (cb_host, cb_port) = callback.advertised();
        let task = ClientTask::new(request, environ, cb_host.to_owned(), cb_port, "handle://retrieve");

        let _control = self.handshake(&task).await?;
        self.wait(&task, &callback).await
    }

    /// The call-back wait loop (source's `DHSProtocol::wait`): accept (or
    /// dial, in passive mode) a fresh connection per call-back, read its
    /// code, and either act on a terminal code or loop back for another
    /// call-back after an in-band log/ping/stats message.
    async fn wait(&self, task: &ClientTask, callback: &CallbackConnection) -> Result<Outcome, ProtocolError> {
        loop {
            let mut stream = callback.connect().await?;
            let code = task.receive(&mut stream).await?;
            tracing::debug!(target: "mars::protocol", code = %(code as char), "call-back code");

            match code {
                b'o' => return Ok(Outcome::Ok),
                b'r' => {
                    // The caller already knows how much it has to send; echo
                    // it back as the source does (`s << bytes`).
                    wire::write_u64(&mut stream, "callback", 0).await?;
                    return Ok(Outcome::ReadRequested { total_bytes: 0 });
                }
                b'w' => {
                    let bytes = wire::read_u64(&mut stream, "callback").await?;
                    return Ok(Outcome::WriteIncoming { bytes });
                }
                b'e' => {
                    let message = wire::read_string(&mut stream, "callback").await?;
                    tracing::error!(target: "mars::protocol", %message, "server reported fatal error");
                    return Err(ProtocolError::ServerError { message });
                }
                b'I' => self.log_inband(&mut stream, tracing::Level::INFO).await?,
                b'W' => self.log_inband(&mut stream, tracing::Level::WARN).await?,
                b'D' => self.log_inband(&mut stream, tracing::Level::DEBUG).await?,
                b'E' => self.log_inband(&mut stream, tracing::Level::ERROR).await?,
                b'p' => {
                    stream
                        .write_u8(b'p')
                        .await
                        .map_err(|e| ProtocolError::io("callback", e))?;
                }
                b's' => self.read_statistics(&mut stream).await?,
                b'h' | b'm' | b'X' | b'y' | b'N' | b'S' | b't' => {
                    return Err(ProtocolError::Reserved { code: code as char })
                }
                other => return Err(ProtocolError::UnexpectedCode { code: other as char }),
            }
        }
    }

    async fn log_inband(&self, stream: &mut TcpStream, level: tracing::Level) -> Result<(), ProtocolError> {
        let message = wire::read_string(stream, "callback").await?;
        match level {
            tracing::Level::INFO => tracing::info!(target: "mars::protocol", %message, name = %self.name),
            tracing::Level::WARN => tracing::warn!(target: "mars::protocol", %message, name = %self.name),
            tracing::Level::ERROR => tracing::error!(target: "mars::protocol", %message, name = %self.name),
            _ => tracing::debug!(target: "mars::protocol", %message, name = %self.name),
        }
        Ok(())
    }

    async fn read_statistics(&self, stream: &mut TcpStream) -> Result<(), ProtocolError> {
        let n = wire::read_i32(stream, "callback").await?;
        for _ in 0..n.max(0) {
            let key = wire::read_string(stream, "callback").await?;
            let value = wire::read_string(stream, "callback").await?;
            tracing::info!(target: "mars::protocol", %key, %value, "call-back statistic");
        }
        Ok(())
    }

    /// The trailer a mid-send client writes on cleanup (§4.7 step 5, source's
    /// `DHSProtocol::cleanup`): `(u32 version = 1, u64 crc = 0)`.
    pub async fn write_trailer(stream: &mut TcpStream) -> Result<(), ProtocolError> {
        stream
            .write_u32(1)
            .await
            .map_err(|e| ProtocolError::io("control", e))?;
        stream
            .write_u64(0)
            .await
            .map_err(|e| ProtocolError::io("control", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn wait_loop_returns_ok_on_terminal_o_code() {
        let callback = CallbackConnection::simple().await.unwrap();
        let (host, port) = callback.advertised();
        let (host, port) = (host.to_owned(), port);

        let task = ClientTask::with_nonce(MemDict::new(), MemDict::new(), host.clone(), port, "h", 0xabc);
        let task_for_server = task.clone();

        let server = tokio::spawn(async move {
            let mut stream = TcpStream::connect((host.as_str(), port)).await.unwrap();
            wire::write_u64(&mut stream, "t", task_for_server.nonce).await.unwrap();
            stream.write_u8(b'o').await.unwrap();
        });

        let client = DhsClient::new("test", "unused", 0, false);
        let outcome = client.wait(&task, &callback).await.unwrap();
        server.await.unwrap();
        assert_eq!(outcome, Outcome::Ok);
    }

    #[tokio::test]
    async fn wait_loop_skips_info_lines_before_terminal_code() {
        let callback = CallbackConnection::simple().await.unwrap();
        let (host, port) = callback.advertised();
        let (host, port) = (host.to_owned(), port);

        let task = ClientTask::with_nonce(MemDict::new(), MemDict::new(), host.clone(), port, "h", 0xabc);
        let task_for_server = task.clone();

        let server = tokio::spawn(async move {
            // First call-back: an info line.
            let mut stream = TcpStream::connect((host.as_str(), port)).await.unwrap();
            wire::write_u64(&mut stream, "t", task_for_server.nonce).await.unwrap();
            stream.write_u8(b'I').await.unwrap();
            wire::write_string(&mut stream, "t", "starting retrieval").await.unwrap();
            drop(stream);

            // Second call-back: terminal 'o'.
            let mut stream = TcpStream::connect((host.as_str(), port)).await.unwrap();
            wire::write_u64(&mut stream, "t", task_for_server.nonce).await.unwrap();
            stream.write_u8(b'o').await.unwrap();
        });

        let client = DhsClient::new("test", "unused", 0, false);
        let outcome = client.wait(&task, &callback).await.unwrap();
        server.await.unwrap();
        assert_eq!(outcome, Outcome::Ok);
    }

    #[tokio::test]
    async fn wait_loop_surfaces_fatal_error() {
        let callback = CallbackConnection::simple().await.unwrap();
        let (host, port) = callback.advertised();
        let (host, port) = (host.to_owned(), port);

        let task = ClientTask::with_nonce(MemDict::new(), MemDict::new(), host.clone(), port, "h", 0xabc);
        let task_for_server = task.clone();

        let server = tokio::spawn(async move {
            let mut stream = TcpStream::connect((host.as_str(), port)).await.unwrap();
            wire::write_u64(&mut stream, "t", task_for_server.nonce).await.unwrap();
            stream.write_u8(b'e').await.unwrap();
            wire::write_string(&mut stream, "t", "disk full").await.unwrap();
        });

        let client = DhsClient::new("test", "unused", 0, false);
        let err = client.wait(&task, &callback).await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, ProtocolError::ServerError { message } if message == "disk full"));
    }

    #[tokio::test]
    async fn wait_loop_rejects_reserved_codes() {
        let callback = CallbackConnection::simple().await.unwrap();
        let (host, port) = callback.advertised();
        let (host, port) = (host.to_owned(), port);

        let task = ClientTask::with_nonce(MemDict::new(), MemDict::new(), host.clone(), port, "h", 0xabc);
        let task_for_server = task.clone();

        let server = tokio::spawn(async move {
            let mut stream = TcpStream::connect((host.as_str(), port)).await.unwrap();
            wire::write_u64(&mut stream, "t", task_for_server.nonce).await.unwrap();
            stream.write_u8(b'h').await.unwrap();
        });

        let client = DhsClient::new("test", "unused", 0, false);
        let err = client.wait(&task, &callback).await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, ProtocolError::Reserved { code: 'h' }));
    }

    #[tokio::test]
    async fn handshake_fails_on_bad_acknowledgement_byte() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut discard = [0_u8; 4096];
            let _ = stream.read(&mut discard).await;
            stream.write_u8(b'!').await.unwrap();
        });

        let client = DhsClient::new("test", "127.0.0.1", port, false);
        let callback = CallbackConnection::simple().await.unwrap();
        let (cb_host, cb_port) = callback.advertised();
        let task = ClientTask::new(MemDict::new(), MemDict::new(), cb_host.to_owned(), cb_port, "h");

        let err = client.handshake(&task).await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, ProtocolError::BadAcknowledgement { byte } if byte == b'!'));
    }
}
