use crate::address::AddressType;

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The VER field is not 5.
    #[error("bad version (expected 5, got {0})")]
    BadVersion(u8),

    /// The byte count does not match the length implied by the address type.
    #[error("bad format (expected {expected} bytes, got {actual})")]
    BadFormat { expected: usize, actual: usize },

    /// The ATYP field holds a value outside {1, 3, 4}.
    #[error("bad address type {0:#04x}")]
    BadAddrType(u8),

    /// The caller-supplied output buffer cannot hold the encoded frame.
    #[error("short buffer ({available} bytes, need {needed})")]
    ShortBuffer { needed: usize, available: usize },

    /// Address text cannot be converted to the byte form of its declared type.
    #[error("invalid {address_type} address {address:?}: {reason}")]
    AddressFormat {
        address_type: AddressType,
        address: String,
        reason: &'static str,
    },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before the first byte of a frame, or the sink
    /// stopped accepting bytes.
    #[error("connection closed")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
