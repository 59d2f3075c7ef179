//! Length-prefixed JSON framing: a 4-byte big-endian length, then UTF-8 JSON.
//!
//! The codec is oblivious to message schema — callers serialize/deserialize
//! whatever `serde_json::Value`-compatible type they need.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const DEFAULT_MAX_FRAME: u32 = 1 << 20;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("frame of {len} bytes exceeds cap of {cap} bytes")]
    TooLarge { len: u32, cap: u32 },
    #[error("peer closed connection mid-frame")]
    ConnectionClosed,
    #[error("malformed json payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes `value` as a single length-prefixed frame.
pub async fn write_frame<W, T>(writer: &mut W, value: &T) -> Result<(), WireError>
where
    W: tokio::io::AsyncWrite + Unpin,
    T: Serialize,
{
    let payload = serde_json::to_vec(value)?;
    let len = u32::try_from(payload.len()).unwrap_or(u32::MAX);
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads a single length-prefixed frame and deserializes it as `T`.
pub async fn read_frame<R, T>(reader: &mut R, cap: u32) -> Result<T, WireError>
where
    R: tokio::io::AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(WireError::ConnectionClosed)
        }
        Err(e) => return Err(WireError::Io(e)),
    }
    let len = u32::from_be_bytes(len_buf);
    if len > cap {
        return Err(WireError::TooLarge { len, cap });
    }

    let mut payload = vec![0u8; len as usize];
    match reader.read_exact(&mut payload).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(WireError::ConnectionClosed)
        }
        Err(e) => return Err(WireError::Io(e)),
    }
    Ok(serde_json::from_slice(&payload)?)
}
