//! Request commands, reply statuses, and the reply-status catalog.
//!
//! The CMD byte of a request and the REP byte of a reply share one slot on
//! the wire. [`RequestCommand`] and [`ReplyStatus`] are the two readings of
//! that byte; which one applies depends on the direction of the frame.

use std::fmt;

/// Request command carried in the CMD byte of a client request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RequestCommand {
    Connect = 0x01,
    Bind = 0x02,
    UdpAssociate = 0x03,
}

impl RequestCommand {
    /// Interpret a raw CMD byte.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::Connect),
            0x02 => Some(Self::Bind),
            0x03 => Some(Self::UdpAssociate),
            _ => None,
        }
    }

    /// Upper-case protocol name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Bind => "BIND",
            Self::UdpAssociate => "UDP-ASSOCIATE",
        }
    }
}

impl TryFrom<u8> for RequestCommand {
    type Error = u8;

    fn try_from(code: u8) -> std::result::Result<Self, u8> {
        Self::from_code(code).ok_or(code)
    }
}

impl From<RequestCommand> for u8 {
    fn from(cmd: RequestCommand) -> u8 {
        cmd as u8
    }
}

impl fmt::Display for RequestCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reply status carried in the REP byte of a server reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ReplyStatus {
    Succeeded = 0x00,
    GeneralFailure = 0x01,
    NotAllowed = 0x02,
    NetworkUnreachable = 0x03,
    HostUnreachable = 0x04,
    ConnectionRefused = 0x05,
    TtlExpired = 0x06,
    CommandUnsupported = 0x07,
    AddressUnsupported = 0x08,
}

impl ReplyStatus {
    /// Every defined status, in code order.
    pub const ALL: [ReplyStatus; 9] = [
        Self::Succeeded,
        Self::GeneralFailure,
        Self::NotAllowed,
        Self::NetworkUnreachable,
        Self::HostUnreachable,
        Self::ConnectionRefused,
        Self::TtlExpired,
        Self::CommandUnsupported,
        Self::AddressUnsupported,
    ];

    /// Interpret a raw REP byte.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Raw REP byte.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// True only for [`ReplyStatus::Succeeded`].
    pub fn is_success(self) -> bool {
        self == Self::Succeeded
    }

    /// Failure description, or `None` for [`ReplyStatus::Succeeded`].
    pub fn description(self) -> Option<&'static str> {
        lookup(self.code())
    }

    /// Upper-case protocol name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Succeeded => "SUCCEEDED",
            Self::GeneralFailure => "GENERAL-FAILURE",
            Self::NotAllowed => "NOT-ALLOWED",
            Self::NetworkUnreachable => "NETWORK-UNREACHABLE",
            Self::HostUnreachable => "HOST-UNREACHABLE",
            Self::ConnectionRefused => "CONNECTION-REFUSED",
            Self::TtlExpired => "TTL-EXPIRED",
            Self::CommandUnsupported => "COMMAND-UNSUPPORTED",
            Self::AddressUnsupported => "ADDRESS-UNSUPPORTED",
        }
    }
}

impl TryFrom<u8> for ReplyStatus {
    type Error = u8;

    fn try_from(code: u8) -> std::result::Result<Self, u8> {
        Self::from_code(code).ok_or(code)
    }
}

impl From<ReplyStatus> for u8 {
    fn from(status: ReplyStatus) -> u8 {
        status.code()
    }
}

impl fmt::Display for ReplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure descriptions indexed by `code - 1`.
static CATALOG: [&str; 8] = [
    "General SOCKS server failure",
    "Connection not allowed by ruleset",
    "Network unreachable",
    "Host unreachable",
    "Connection refused",
    "TTL expired",
    "Command not supported",
    "Address type not supported",
];

/// Look up the failure description for a reply status code.
///
/// Returns `None` both for `0` (succeeded) and for codes above `8`. Use
/// [`ReplyStatus::from_code`] to tell those two cases apart.
pub fn lookup(code: u8) -> Option<&'static str> {
    match code {
        1..=8 => Some(CATALOG[usize::from(code) - 1]),
        _ => None,
    }
}

/// A failed reply status as an error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{description}")]
pub struct ReplyError {
    code: u8,
    description: &'static str,
}

impl ReplyError {
    /// Build the error for a failed status code; `None` when the catalog has
    /// no entry for `code`.
    pub fn from_code(code: u8) -> Option<Self> {
        lookup(code).map(|description| Self { code, description })
    }

    /// Raw REP byte.
    pub fn code(&self) -> u8 {
        self.code
    }

    /// Typed status.
    pub fn status(&self) -> ReplyStatus {
        // from_code only accepts catalogued codes 1..=8
        ReplyStatus::ALL[usize::from(self.code)]
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}
