//! Frame codec for length-prefixed framing.
//!
//! # Frame Format
//!
//! Each frame consists of:
//! - 4 bytes: payload length (big-endian)
//! - N bytes: payload
//!
//! A length of 0 is legal and denotes an empty payload. There is no magic
//! prefix, no flags byte, and no implicit terminator: the length field must
//! exactly equal the payload length.

use crate::error::{ProtocolError, Result};

/// Frame header size: 4 bytes of big-endian payload length.
pub const FRAME_HEADER_SIZE: usize = 4;

/// Maximum payload size representable in the 32-bit length field.
pub const MAX_FRAME_PAYLOAD: usize = u32::MAX as usize;

/// Encoder and decoder for frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCodec;

impl FrameCodec {
    /// Create a new frame codec.
    pub fn new() -> Self {
        Self
    }

    /// Encode a payload into a frame: 4-byte big-endian length, then the
    /// payload bytes.
    pub fn encode(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let len = u32::try_from(payload.len()).map_err(|_| ProtocolError::FrameTooLarge {
            size: payload.len(),
            max: MAX_FRAME_PAYLOAD,
        })?;

        let mut output = Vec::with_capacity(FRAME_HEADER_SIZE + payload.len());
        output.extend_from_slice(&len.to_be_bytes());
        output.extend_from_slice(payload);
        Ok(output)
    }

    /// Decode a frame from bytes.
    ///
    /// Returns the payload and the number of bytes consumed.
    pub fn decode(&self, data: &[u8]) -> Result<(Vec<u8>, usize)> {
        if data.len() < FRAME_HEADER_SIZE {
            return Err(ProtocolError::Decode(format!(
                "insufficient data for frame header: need {} bytes, have {}",
                FRAME_HEADER_SIZE,
                data.len()
            )));
        }

        let length_bytes: [u8; 4] = data[..FRAME_HEADER_SIZE]
            .try_into()
            .map_err(|_| ProtocolError::Decode("frame header read failed".to_string()))?;
        let payload_len = u32::from_be_bytes(length_bytes) as usize;

        let total = FRAME_HEADER_SIZE + payload_len;
        if data.len() < total {
            return Err(ProtocolError::Decode(format!(
                "insufficient data for frame: need {} bytes, have {}",
                total,
                data.len()
            )));
        }

        Ok((data[FRAME_HEADER_SIZE..total].to_vec(), total))
    }

    /// Try to decode a frame, returning `None` if there isn't enough data yet.
    ///
    /// Useful for streaming scenarios where partial frames arrive.
    pub fn try_decode(&self, data: &[u8]) -> Result<Option<(Vec<u8>, usize)>> {
        if data.len() < FRAME_HEADER_SIZE {
            return Ok(None);
        }

        let length_bytes: [u8; 4] = data[..FRAME_HEADER_SIZE]
            .try_into()
            .map_err(|_| ProtocolError::Decode("frame header read failed".to_string()))?;
        let payload_len = u32::from_be_bytes(length_bytes) as usize;

        if data.len() < FRAME_HEADER_SIZE + payload_len {
            return Ok(None);
        }

        self.decode(data).map(Some)
    }
}
