//! `ClientTask`: the request/environment/call-back bundle sent to open a
//! MARS retrieval or archival (§3 "Request task", §4.7, §6 "MARS wire
//! framing").

use mars2grib_core::MemDict;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::ProtocolError;
use crate::nonce;
use crate::wire;

/// `mars`/`environ` are carried as JSON over the wire rather than through
/// the eckit `Stream` tagged-object format the source uses: `MarsRequest`
/// parsing and expansion is an explicitly out-of-scope collaborator (§1),
/// so this crate only needs a byte-for-byte-stable encoding of whatever
/// dictionary the caller already built, not the MARS request grammar itself.
#[derive(Debug, Clone)]
pub struct ClientTask {
    pub request: MemDict,
    pub environ: MemDict,
    pub callback_host: String,
    pub callback_port: u16,
    pub nonce: u64,
    pub data_handle_descriptor: String,
}

impl ClientTask {
    /// Build a task, composing a fresh nonce the way the source's
    /// constructor does when called with `id = 0` (§4.7, §9 "Legacy wire id").
    pub fn new(
        request: MemDict,
        environ: MemDict,
        callback_host: impl Into<String>,
        callback_port: u16,
        data_handle_descriptor: impl Into<String>,
    ) -> Self {
        ClientTask {
            request,
            environ,
            callback_host: callback_host.into(),
            callback_port,
            nonce: nonce::generate(),
            data_handle_descriptor: data_handle_descriptor.into(),
        }
    }

    /// With an explicit nonce, for tests and for replaying a task id a
    /// caller already owns.
    pub fn with_nonce(
        request: MemDict,
        environ: MemDict,
        callback_host: impl Into<String>,
        callback_port: u16,
        data_handle_descriptor: impl Into<String>,
        nonce: u64,
    ) -> Self {
        ClientTask {
            request,
            environ,
            callback_host: callback_host.into(),
            callback_port,
            nonce,
            data_handle_descriptor: data_handle_descriptor.into(),
        }
    }

    /// Send the initial `MarsTask` frame (§6): a dummy 8-byte request id,
    /// the request, the environment, call-back host/port, the nonce, and
    /// the data-handle descriptor.
    pub async fn send<W: AsyncWrite + Unpin>(&self, w: &mut W) -> Result<(), ProtocolError> {
        wire::write_string(w, "control", "MarsTask").await?;
        wire::write_u64(w, "control", 0).await?; // dummy request id (§6)
        wire::write_string(w, "control", &serde_json::to_string(&self.request).unwrap_or_default()).await?;
        wire::write_string(w, "control", &serde_json::to_string(&self.environ).unwrap_or_default()).await?;
        wire::write_string(w, "control", &self.callback_host).await?;
        wire::write_i32(w, "control", self.callback_port as i32).await?;
        wire::write_u64(w, "control", self.nonce).await?;
        wire::write_string(w, "control", &self.data_handle_descriptor).await?;
        Ok(())
    }

    /// Read one call-back frame: the 64-bit nonce (verified against this
    /// task's own) followed by the single-byte code (§4.7 step 4).
    pub async fn receive<R: AsyncRead + Unpin>(&self, r: &mut R) -> Result<u8, ProtocolError> {
        let got_nonce = wire::read_u64(r, "callback").await?;
        if got_nonce != self.nonce {
            return Err(ProtocolError::NonceMismatch {
                expected: self.nonce,
                actual: got_nonce,
            });
        }
        wire::read_u8(r, "callback").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mars2grib_core::Dictionary;

    fn sample_task() -> ClientTask {
        let mut request = MemDict::new();
        request.insert("class", "od");
        ClientTask::with_nonce(request, MemDict::new(), "127.0.0.1", 9001, "handle://0", 0x1234)
    }

    #[tokio::test]
    async fn send_then_manual_parse_recovers_the_frame() {
        let task = sample_task();
        let mut buf = Vec::new();
        task.send(&mut buf).await.unwrap();

        let mut cursor = std::io::Cursor::new(buf);
        let tag = wire::read_string(&mut cursor, "t").await.unwrap();
        assert_eq!(tag, "MarsTask");
        let dummy = wire::read_u64(&mut cursor, "t").await.unwrap();
        assert_eq!(dummy, 0);
        let request_json = wire::read_string(&mut cursor, "t").await.unwrap();
        assert!(request_json.contains("\"class\""));
        let _environ_json = wire::read_string(&mut cursor, "t").await.unwrap();
        let host = wire::read_string(&mut cursor, "t").await.unwrap();
        assert_eq!(host, "127.0.0.1");
        let port = wire::read_i32(&mut cursor, "t").await.unwrap();
        assert_eq!(port, 9001);
        let nonce = wire::read_u64(&mut cursor, "t").await.unwrap();
        assert_eq!(nonce, 0x1234);
    }

    #[tokio::test]
    async fn receive_accepts_matching_nonce() {
        let task = sample_task();
        let mut buf = Vec::new();
        wire::write_u64(&mut buf, "t", 0x1234).await.unwrap();
        wire::write_u8(&mut buf, "t", b'o').await.unwrap();
        let mut cursor = std::io::Cursor::new(buf);
        let code = task.receive(&mut cursor).await.unwrap();
        assert_eq!(code, b'o');
    }

    #[tokio::test]
    async fn receive_rejects_mismatched_nonce() {
        let task = sample_task();
        let mut buf = Vec::new();
        wire::write_u64(&mut buf, "t", 0xffff).await.unwrap();
        wire::write_u8(&mut buf, "t", b'o').await.unwrap();
        let mut cursor = std::io::Cursor::new(buf);
        let err = task.receive(&mut cursor).await.unwrap_err();
        assert!(matches!(err, ProtocolError::NonceMismatch { .. }));
    }
}
