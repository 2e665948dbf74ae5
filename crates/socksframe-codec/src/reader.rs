use std::io::{ErrorKind, Read};
use std::net::TcpStream;

use bytes::BytesMut;
use tracing::debug;

use crate::codec::{decode_frame, frame_len, Frame, FrameConfig, HEADER_SIZE, MAX_FRAME_LEN};
use crate::error::{FrameError, Result};

/// Reads complete frames from any `Read` stream.
///
/// Handles partial reads internally; callers always get complete frames.
/// The reader requests exactly the bytes the frame declares, so whatever
/// follows the frame on the stream is left unread.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(MAX_FRAME_LEN),
            config,
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Reads the 4-byte header, then the domain length prefix when present,
    /// then exactly the remaining declared bytes. Returns
    /// `Err(FrameError::ConnectionClosed)` when EOF is reached before the
    /// first byte and `Err(FrameError::BadFormat { .. })` when it is reached
    /// mid-frame.
    ///
    /// Bytes already received are kept across an [`FrameError::Io`] error
    /// (such as a read timeout), so calling again resumes the same frame.
    /// Any other error discards them.
    pub fn read_frame(&mut self) -> Result<Frame> {
        let frame = match self.read_buffered() {
            Ok(frame) => frame,
            Err(err @ FrameError::Io(_)) => return Err(err),
            Err(err) => {
                self.buf.clear();
                return Err(err);
            }
        };
        debug!(
            code = frame.code,
            atyp = %frame.address_type(),
            port = frame.port,
            "read socks frame"
        );
        Ok(frame)
    }

    fn read_buffered(&mut self) -> Result<Frame> {
        self.fill_to(HEADER_SIZE)?;

        let total = loop {
            match frame_len(&self.buf)? {
                Some(total) => break total,
                None => self.fill_to(self.buf.len() + 1)?,
            }
        };
        self.fill_to(total)?;

        decode_frame(&mut self.buf)?.ok_or(FrameError::BadFormat {
            expected: total,
            actual: self.buf.len(),
        })
    }

    fn fill_to(&mut self, target: usize) -> Result<()> {
        let mut chunk = [0u8; MAX_FRAME_LEN];
        while self.buf.len() < target {
            let want = target - self.buf.len();
            let read = match self.inner.read(&mut chunk[..want]) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                if self.buf.is_empty() {
                    return Err(FrameError::ConnectionClosed);
                }
                return Err(FrameError::BadFormat {
                    expected: target,
                    actual: self.buf.len(),
                });
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
        Ok(())
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl FrameReader<TcpStream> {
    /// Create a frame reader for a `TcpStream` and apply read timeout from config.
    pub fn with_config_tcp(inner: TcpStream, config: FrameConfig) -> Result<Self> {
        inner.set_read_timeout(config.read_timeout)?;
        Ok(Self::with_config(inner, config))
    }
}

/// Read one frame from `source` without wrapping it.
pub fn read_frame<R: Read>(source: &mut R) -> Result<Frame> {
    FrameReader::new(source).read_frame()
}
