//! SOCKS5 request/reply frame codec.
//!
//! socksframe encodes and decodes the fixed-layout request and reply frames
//! exchanged after SOCKS5 method negotiation, and explains reply status codes.
//!
//! # Crate Structure
//!
//! - [`codec`]: Frame model, wire codec, and blocking stream reader/writer
//! - [`status`]: Request commands, reply statuses, and the status catalog
//!
//! The `async` feature adds a `tokio_util::codec` adapter
//! ([`codec::SocksCodec`]).

/// Re-export codec types.
pub mod codec {
    pub use socksframe_codec::*;
}

/// Re-export status types.
pub mod status {
    pub use socksframe_codec::status::*;
}

pub use socksframe_codec::{Address, AddressType, Frame, FrameError, FrameReader, FrameWriter};
