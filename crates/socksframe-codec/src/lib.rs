//! SOCKS5 request/reply framing (RFC 1928 §4, §6).
//!
//! Every request and reply shares one layout:
//! - A 4-byte header: version (always 5), command or reply code, reserved, address type
//! - The address: 4 bytes (IPv4), 16 bytes (IPv6), or a 1-byte length and name (domain)
//! - A 2-byte big-endian port
//!
//! Decoding validates the exact length each address type implies. Stream
//! reads accumulate partial reads and never consume bytes past the frame.

pub mod address;
#[cfg(feature = "async")]
pub mod async_codec;
pub mod codec;
pub mod error;
pub mod reader;
pub mod status;
pub mod writer;

pub use address::{Address, AddressType, DomainName, MAX_DOMAIN_LEN};
#[cfg(feature = "async")]
pub use async_codec::SocksCodec;
pub use codec::{
    decode_frame, encode_frame, Frame, FrameConfig, HEADER_SIZE, IPV4_FRAME_LEN, IPV6_FRAME_LEN,
    MAX_FRAME_LEN, MIN_FRAME_LEN, SOCKS_VERSION,
};
pub use error::{FrameError, Result};
pub use reader::{read_frame, FrameReader};
pub use status::{lookup, ReplyError, ReplyStatus, RequestCommand};
pub use writer::{write_frame, FrameWriter};
