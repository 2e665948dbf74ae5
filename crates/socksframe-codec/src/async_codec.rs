//! `tokio_util::codec` adapter for SOCKS5 frames.
//!
//! `Framed` reads ahead of the frame it returns. Recover bytes that belong to
//! the relay phase with `Framed::into_parts().read_buf`.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::{decode_frame, encode_frame, frame_len, Frame, HEADER_SIZE, MIN_FRAME_LEN};
use crate::error::{FrameError, Result};

/// Stateless codec for use with `tokio_util::codec::Framed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocksCodec;

impl SocksCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for SocksCodec {
    type Item = Frame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        decode_frame(src)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        if let Some(frame) = decode_frame(src)? {
            return Ok(Some(frame));
        }
        if src.is_empty() {
            return Ok(None);
        }
        let expected = match frame_len(src)? {
            Some(total) => total,
            None if src.len() < HEADER_SIZE => HEADER_SIZE,
            None => MIN_FRAME_LEN,
        };
        Err(FrameError::BadFormat {
            expected,
            actual: src.len(),
        })
    }
}

impl Encoder<Frame> for SocksCodec {
    type Error = FrameError;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<()> {
        encode_frame(&item, dst);
        Ok(())
    }
}

impl<'a> Encoder<&'a Frame> for SocksCodec {
    type Error = FrameError;

    fn encode(&mut self, item: &'a Frame, dst: &mut BytesMut) -> Result<()> {
        encode_frame(item, dst);
        Ok(())
    }
}
