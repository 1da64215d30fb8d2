//! Low-level framing primitives shared by [`crate::task::ClientTask`] and the
//! call-back reader (§4.7, §6 "MARS wire framing").
//!
//! The source streams these through `eckit::Stream`, a tagged-object
//! serializer this workspace does not vendor. This crate reproduces only the
//! on-wire shapes the protocol table in §4.7 actually names: big-endian
//! fixed-width integers and length-prefixed UTF-8 strings. Every string is
//! framed as a `u32` byte length followed by its UTF-8 bytes; every integer
//! is sent big-endian, matching the byte-order convention the rest of this
//! workspace already uses for the PV-array byte table.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::ProtocolError;

pub async fn write_u8<W: AsyncWrite + Unpin>(w: &mut W, peer: &'static str, v: u8) -> Result<(), ProtocolError> {
    w.write_u8(v).await.map_err(|e| ProtocolError::io(peer, e))
}

pub async fn read_u8<R: AsyncRead + Unpin>(r: &mut R, peer: &'static str) -> Result<u8, ProtocolError> {
    r.read_u8().await.map_err(|e| ProtocolError::io(peer, e))
}

pub async fn write_u64<W: AsyncWrite + Unpin>(w: &mut W, peer: &'static str, v: u64) -> Result<(), ProtocolError> {
    w.write_u64(v).await.map_err(|e| ProtocolError::io(peer, e))
}

pub async fn read_u64<R: AsyncRead + Unpin>(r: &mut R, peer: &'static str) -> Result<u64, ProtocolError> {
    r.read_u64().await.map_err(|e| ProtocolError::io(peer, e))
}

pub async fn write_i32<W: AsyncWrite + Unpin>(w: &mut W, peer: &'static str, v: i32) -> Result<(), ProtocolError> {
    w.write_i32(v).await.map_err(|e| ProtocolError::io(peer, e))
}

pub async fn read_i32<R: AsyncRead + Unpin>(r: &mut R, peer: &'static str) -> Result<i32, ProtocolError> {
    r.read_i32().await.map_err(|e| ProtocolError::io(peer, e))
}

pub async fn write_string<W: AsyncWrite + Unpin>(
    w: &mut W,
    peer: &'static str,
    s: &str,
) -> Result<(), ProtocolError> {
    write_u64(w, peer, s.len() as u64).await?;
    w.write_all(s.as_bytes())
        .await
        .map_err(|e| ProtocolError::io(peer, e))
}

pub async fn read_string<R: AsyncRead + Unpin>(r: &mut R, peer: &'static str) -> Result<String, ProtocolError> {
    let len = read_u64(r, peer).await? as usize;
    let mut buf = vec![0_u8; len];
    r.read_exact(&mut buf).await.map_err(|e| ProtocolError::io(peer, e))?;
    String::from_utf8(buf).map_err(|e| {
        ProtocolError::io(peer, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

pub async fn write_bytes<W: AsyncWrite + Unpin>(w: &mut W, peer: &'static str, bytes: &[u8]) -> Result<(), ProtocolError> {
    write_u64(w, peer, bytes.len() as u64).await?;
    w.write_all(bytes).await.map_err(|e| ProtocolError::io(peer, e))
}

pub async fn read_bytes<R: AsyncRead + Unpin>(r: &mut R, peer: &'static str) -> Result<Vec<u8>, ProtocolError> {
    let len = read_u64(r, peer).await? as usize;
    let mut buf = vec![0_u8; len];
    r.read_exact(&mut buf).await.map_err(|e| ProtocolError::io(peer, e))?;
    Ok(buf)
}

pub async fn write_bool<W: AsyncWrite + Unpin>(w: &mut W, peer: &'static str, v: bool) -> Result<(), ProtocolError> {
    write_u8(w, peer, v as u8).await
}

pub async fn read_bool<R: AsyncRead + Unpin>(r: &mut R, peer: &'static str) -> Result<bool, ProtocolError> {
    Ok(read_u8(r, peer).await? != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn string_round_trips_through_a_byte_buffer() {
        let mut buf = Vec::new();
        write_string(&mut buf, "test", "hello, mars").await.unwrap();
        let mut cursor = std::io::Cursor::new(buf);
        let back = read_string(&mut cursor, "test").await.unwrap();
        assert_eq!(back, "hello, mars");
    }

    #[tokio::test]
    async fn u64_round_trips() {
        let mut buf = Vec::new();
        write_u64(&mut buf, "test", 0xdead_beef_cafe_babe).await.unwrap();
        let mut cursor = std::io::Cursor::new(buf);
        assert_eq!(read_u64(&mut cursor, "test").await.unwrap(), 0xdead_beef_cafe_babe);
    }
}
