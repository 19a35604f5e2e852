//! Async framed transport over any byte stream.
//!
//! Wraps an `AsyncRead + AsyncWrite` stream with the length-prefixed frame
//! format from [`crate::framing`] and enforces the per-read inactivity
//! timeout. The timeout is a transport policy: the framing layer itself has
//! no notion of time.
//!
//! Encrypted payloads travel as `u32(split_factor) || frame(ciphertext)`;
//! see [`send_sealed`](FramedConnection::send_sealed).

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::error::{ProtocolError, Result};
use crate::framing::FrameCodec;

/// Default inactivity timeout for reads (matches the reference transport's
/// 20-second socket timeout).
pub const READ_TIMEOUT: Duration = Duration::from_secs(20);

/// A framed, timeout-guarded connection over a byte stream.
#[derive(Debug)]
pub struct FramedConnection<S> {
    stream: S,
    codec: FrameCodec,
    read_timeout: Duration,
}

impl<S: AsyncRead + AsyncWrite + Unpin> FramedConnection<S> {
    /// Create a connection with the default 20-second read timeout.
    pub fn new(stream: S) -> Self {
        Self::with_timeout(stream, READ_TIMEOUT)
    }

    /// Create a connection with an explicit read timeout.
    pub fn with_timeout(stream: S, read_timeout: Duration) -> Self {
        Self {
            stream,
            codec: FrameCodec::new(),
            read_timeout,
        }
    }

    /// Write a length-prefixed frame and flush.
    pub async fn send_frame(&mut self, payload: &[u8]) -> Result<()> {
        let encoded = self.codec.encode(payload)?;
        self.stream.write_all(&encoded).await?;
        self.stream.flush().await?;
        tracing::trace!(len = payload.len(), "frame sent");
        Ok(())
    }

    /// Read one length-prefixed frame, honoring the inactivity timeout.
    pub async fn recv_frame(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u32_timed().await?;
        let mut payload = vec![0u8; len as usize];
        self.read_exact_timed(&mut payload).await?;
        tracing::trace!(len, "frame received");
        Ok(payload)
    }

    /// Write an encrypted payload: the 4-byte big-endian split factor,
    /// then the ciphertext as a frame.
    pub async fn send_sealed(&mut self, split_factor: u32, ciphertext: &[u8]) -> Result<()> {
        self.stream.write_all(&split_factor.to_be_bytes()).await?;
        self.send_frame(ciphertext).await
    }

    /// Read an encrypted payload: split factor, then ciphertext frame.
    pub async fn recv_sealed(&mut self) -> Result<(u32, Vec<u8>)> {
        let split_factor = self.read_u32_timed().await?;
        let ciphertext = self.recv_frame().await?;
        Ok((split_factor, ciphertext))
    }

    /// Shut down the write side of the stream.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.stream.shutdown().await?;
        Ok(())
    }

    async fn read_u32_timed(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact_timed(&mut buf).await?;
        Ok(u32::from_be_bytes(buf))
    }

    async fn read_exact_timed(&mut self, buf: &mut [u8]) -> Result<()> {
        match timeout(self.read_timeout, self.stream.read_exact(buf)).await {
            Ok(read) => {
                read?;
                Ok(())
            }
            Err(_) => Err(ProtocolError::Timeout(format!(
                "no data within {:?}",
                self.read_timeout
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_recv_roundtrip() {
        let (a, b) = tokio::io::duplex(1024);
        let mut left = FramedConnection::new(a);
        let mut right = FramedConnection::new(b);

        left.send_frame(b"hello").await.unwrap();
        let payload = right.recv_frame().await.unwrap();
        assert_eq!(payload, b"hello");
    }

    #[tokio::test]
    async fn test_empty_frame_roundtrip() {
        let (a, b) = tokio::io::duplex(64);
        let mut left = FramedConnection::new(a);
        let mut right = FramedConnection::new(b);

        left.send_frame(&[]).await.unwrap();
        let payload = right.recv_frame().await.unwrap();
        assert!(payload.is_empty());
    }

    #[tokio::test]
    async fn test_sealed_roundtrip() {
        let (a, b) = tokio::io::duplex(1024);
        let mut left = FramedConnection::new(a);
        let mut right = FramedConnection::new(b);

        left.send_sealed(4, &[1, 2, 3, 4, 5, 6, 7, 8]).await.unwrap();
        let (split, ct) = right.recv_sealed().await.unwrap();
        assert_eq!(split, 4);
        assert_eq!(ct, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[tokio::test]
    async fn test_read_timeout() {
        let (a, _b) = tokio::io::duplex(64);
        let mut conn = FramedConnection::with_timeout(a, Duration::from_millis(20));

        let result = conn.recv_frame().await;
        assert!(matches!(result, Err(ProtocolError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_peer_close_is_connection_closed() {
        let (a, b) = tokio::io::duplex(64);
        drop(b);
        let mut conn = FramedConnection::new(a);

        let result = conn.recv_frame().await;
        assert!(matches!(result, Err(ProtocolError::ConnectionClosed(_))));
    }

    #[tokio::test]
    async fn test_interleaved_frames_preserve_order() {
        let (a, b) = tokio::io::duplex(1024);
        let mut left = FramedConnection::new(a);
        let mut right = FramedConnection::new(b);

        left.send_frame(b"first").await.unwrap();
        left.send_frame(b"second").await.unwrap();

        assert_eq!(right.recv_frame().await.unwrap(), b"first");
        assert_eq!(right.recv_frame().await.unwrap(), b"second");
    }
}
