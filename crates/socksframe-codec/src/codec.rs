use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::address::{Address, AddressType, DomainName};
use crate::error::{FrameError, Result};
use crate::status::{ReplyError, ReplyStatus, RequestCommand};

/// Protocol version carried in every frame.
pub const SOCKS_VERSION: u8 = 0x05;

/// Fixed header: VER (1) + CMD (1) + RSV (1) + ATYP (1) = 4 bytes.
pub const HEADER_SIZE: usize = 4;

/// Smallest possible frame: header + empty domain (1) + port (2).
pub const MIN_FRAME_LEN: usize = HEADER_SIZE + 1 + 2;

/// Largest possible frame: header + 255-byte domain with prefix + port.
pub const MAX_FRAME_LEN: usize = HEADER_SIZE + 1 + 255 + 2;

/// Frame length for an IPv4 address.
pub const IPV4_FRAME_LEN: usize = HEADER_SIZE + 4 + 2;

/// Frame length for an IPv6 address.
pub const IPV6_FRAME_LEN: usize = HEADER_SIZE + 16 + 2;

/// A SOCKS5 request or reply.
///
/// `code` is the CMD byte of a request or the REP byte of a reply. Use
/// [`Frame::request_command`] or [`Frame::reply_status`] depending on which
/// side of the exchange the frame came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Raw CMD/REP byte.
    pub code: u8,
    /// Destination (request) or bound (reply) address.
    pub address: Address,
    /// Destination or bound port.
    pub port: u16,
}

impl Frame {
    /// Create a frame from a raw code.
    pub fn new(code: u8, address: impl Into<Address>, port: u16) -> Self {
        Self {
            code,
            address: address.into(),
            port,
        }
    }

    /// Create a client request.
    pub fn request(command: RequestCommand, address: impl Into<Address>, port: u16) -> Self {
        Self::new(command.into(), address, port)
    }

    /// Create a server reply.
    pub fn reply(status: ReplyStatus, address: impl Into<Address>, port: u16) -> Self {
        Self::new(status.into(), address, port)
    }

    /// Create a frame from a textual address of the declared type.
    ///
    /// Fails with [`FrameError::AddressFormat`] when `address` cannot be
    /// represented in the byte form `address_type` requires.
    pub fn from_parts(
        code: u8,
        address_type: AddressType,
        address: &str,
        port: u16,
    ) -> Result<Self> {
        Ok(Self::new(code, Address::parse(address_type, address)?, port))
    }

    pub fn address_type(&self) -> AddressType {
        self.address.address_type()
    }

    /// The code read as a request command.
    pub fn request_command(&self) -> Option<RequestCommand> {
        RequestCommand::from_code(self.code)
    }

    /// The code read as a reply status.
    pub fn reply_status(&self) -> Option<ReplyStatus> {
        ReplyStatus::from_code(self.code)
    }

    /// Resolve the code, read as a reply status, against the catalog.
    ///
    /// `None` means either success (code 0) or an uncatalogued code; only call
    /// this on replies.
    pub fn resolve_status(&self) -> Option<ReplyError> {
        ReplyError::from_code(self.code)
    }

    /// Catalog description of the code, read as a reply status.
    pub fn status_description(&self) -> Option<&'static str> {
        crate::status::lookup(self.code)
    }

    /// The total wire size of this frame.
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.address.wire_len() + 2
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_size());
        encode_frame(self, &mut buf);
        buf.freeze()
    }

    /// Encode into a caller-supplied buffer, returning the bytes written.
    ///
    /// Nothing is written when `buf` is too small.
    pub fn encode_to_slice(&self, buf: &mut [u8]) -> Result<usize> {
        let needed = self.wire_size();
        if buf.len() < needed {
            return Err(FrameError::ShortBuffer {
                needed,
                available: buf.len(),
            });
        }
        let mut dst = &mut buf[..needed];
        put_frame(self, &mut dst);
        Ok(needed)
    }

    /// Decode exactly one frame from a complete buffer.
    ///
    /// Unlike [`decode_frame`], a short buffer or trailing bytes are
    /// reported as [`FrameError::BadFormat`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_FRAME_LEN {
            return Err(FrameError::BadFormat {
                expected: MIN_FRAME_LEN,
                actual: bytes.len(),
            });
        }

        let expected = frame_len(bytes)?.unwrap_or(MIN_FRAME_LEN);
        if bytes.len() != expected {
            return Err(FrameError::BadFormat {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(parse_frame(bytes))
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌─────┬─────┬─────┬──────┬──────────────────┬──────────┐
/// │ VER │ CMD │ RSV │ ATYP │ ADDR             │ PORT     │
/// │ 05  │ (1) │ 00  │ (1)  │ 4 / 16 / 1+L     │ (2B BE)  │
/// └─────┴─────┴─────┴──────┴──────────────────┴──────────┘
/// ```
pub fn encode_frame(frame: &Frame, dst: &mut BytesMut) {
    dst.reserve(frame.wire_size());
    put_frame(frame, dst);
    trace!(
        atyp = %frame.address_type(),
        len = frame.wire_size(),
        "encoded socks frame"
    );
}

fn put_frame<B: BufMut>(frame: &Frame, dst: &mut B) {
    dst.put_slice(&[
        SOCKS_VERSION,
        frame.code,
        0x00,
        frame.address_type().code(),
    ]);
    match &frame.address {
        Address::Ipv4(addr) => dst.put_slice(&addr.octets()),
        Address::Domain(name) => {
            // DomainName guarantees len <= 255
            dst.put_u8(name.len() as u8);
            dst.put_slice(name.as_bytes());
        }
        Address::Ipv6(addr) => dst.put_slice(&addr.octets()),
    }
    dst.put_u16(frame.port);
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// The version and address type are checked as soon as the header is
/// buffered. On success, consumes exactly the frame bytes from the buffer.
pub fn decode_frame(src: &mut BytesMut) -> Result<Option<Frame>> {
    let Some(total) = frame_len(src)? else {
        return Ok(None);
    };
    if src.len() < total {
        return Ok(None);
    }

    let frame = parse_frame(&src[..total]);
    src.advance(total);
    trace!(atyp = %frame.address_type(), len = total, "decoded socks frame");
    Ok(Some(frame))
}

/// Total length of the frame starting at `header`, once it can be known.
///
/// Needs the 4-byte header, plus the length prefix for domain frames.
pub(crate) fn frame_len(header: &[u8]) -> Result<Option<usize>> {
    if header.len() < HEADER_SIZE {
        return Ok(None);
    }
    if header[0] != SOCKS_VERSION {
        return Err(FrameError::BadVersion(header[0]));
    }

    let len = match AddressType::try_from(header[3])? {
        AddressType::Ipv4 => IPV4_FRAME_LEN,
        AddressType::Ipv6 => IPV6_FRAME_LEN,
        AddressType::Domain => match header.get(HEADER_SIZE) {
            Some(&name_len) => MIN_FRAME_LEN + usize::from(name_len),
            None => return Ok(None),
        },
    };
    Ok(Some(len))
}

/// Build a frame from a slice already validated by `frame_len`.
fn parse_frame(mut buf: &[u8]) -> Frame {
    let code = buf[1];
    let atyp = buf[3];
    buf.advance(HEADER_SIZE);

    let address = match atyp {
        0x01 => {
            let mut octets = [0u8; 4];
            buf.copy_to_slice(&mut octets);
            Address::Ipv4(Ipv4Addr::from(octets))
        }
        0x04 => {
            let mut octets = [0u8; 16];
            buf.copy_to_slice(&mut octets);
            Address::Ipv6(Ipv6Addr::from(octets))
        }
        _ => {
            let len = usize::from(buf.get_u8());
            let name = Bytes::copy_from_slice(&buf[..len]);
            buf.advance(len);
            Address::Domain(DomainName::from_wire(name))
        }
    };
    let port = buf.get_u16();

    Frame {
        code,
        address,
        port,
    }
}

/// Configuration for the blocking stream wrappers.
#[derive(Debug, Clone, Default)]
pub struct FrameConfig {
    /// Read timeout applied by [`crate::FrameReader::with_config_tcp`].
    pub read_timeout: Option<Duration>,
    /// Write timeout applied by [`crate::FrameWriter::with_config_tcp`].
    pub write_timeout: Option<Duration>,
}
