//! Destination/bound address carried in a frame.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use bytes::Bytes;

use crate::error::{FrameError, Result};

/// Longest domain name the 1-byte length prefix can describe.
pub const MAX_DOMAIN_LEN: usize = u8::MAX as usize;

/// The ATYP discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AddressType {
    Ipv4 = 0x01,
    Domain = 0x03,
    Ipv6 = 0x04,
}

impl AddressType {
    /// Interpret a raw ATYP byte.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::Ipv4),
            0x03 => Some(Self::Domain),
            0x04 => Some(Self::Ipv6),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AddressType {
    type Error = FrameError;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_code(code).ok_or(FrameError::BadAddrType(code))
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ipv4 => "IPv4",
            Self::Domain => "domain",
            Self::Ipv6 => "IPv6",
        })
    }
}

/// A domain name of at most 255 bytes.
///
/// The bytes are kept as received; no character-set validation is done, so
/// names that are not UTF-8 still round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DomainName(Bytes);

impl DomainName {
    /// Wrap raw name bytes, rejecting names longer than [`MAX_DOMAIN_LEN`].
    pub fn new(name: impl Into<Bytes>) -> Result<Self> {
        let name = name.into();
        if name.len() > MAX_DOMAIN_LEN {
            return Err(FrameError::AddressFormat {
                address_type: AddressType::Domain,
                address: String::from_utf8_lossy(&name).into_owned(),
                reason: "domain name longer than 255 bytes",
            });
        }
        Ok(Self(name))
    }

    /// Wrap bytes read after a 1-byte length prefix.
    pub(crate) fn from_wire(name: Bytes) -> Self {
        debug_assert!(name.len() <= MAX_DOMAIN_LEN);
        Self(name)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The name as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::str::FromStr for DomainName {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// Address payload, one variant per ATYP value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    Ipv4(Ipv4Addr),
    Domain(DomainName),
    Ipv6(Ipv6Addr),
}

impl Address {
    /// Parse the textual form of an address of the given type.
    ///
    /// IPv4 text must be dotted-decimal and IPv6 text colon-hex; domain text
    /// is taken verbatim up to 255 bytes.
    pub fn parse(address_type: AddressType, text: &str) -> Result<Self> {
        let invalid = |reason| FrameError::AddressFormat {
            address_type,
            address: text.to_string(),
            reason,
        };

        match address_type {
            AddressType::Ipv4 => text
                .parse::<Ipv4Addr>()
                .map(Self::Ipv4)
                .map_err(|_| invalid("not a dotted-decimal IPv4 address")),
            AddressType::Ipv6 => text
                .parse::<Ipv6Addr>()
                .map(Self::Ipv6)
                .map_err(|_| invalid("not a colon-hex IPv6 address")),
            AddressType::Domain => text.parse::<DomainName>().map(Self::Domain),
        }
    }

    /// Build a domain address from text.
    pub fn domain(name: &str) -> Result<Self> {
        Self::parse(AddressType::Domain, name)
    }

    pub fn address_type(&self) -> AddressType {
        match self {
            Self::Ipv4(_) => AddressType::Ipv4,
            Self::Domain(_) => AddressType::Domain,
            Self::Ipv6(_) => AddressType::Ipv6,
        }
    }

    /// Bytes occupied by DST.ADDR on the wire, including the domain length
    /// prefix.
    pub fn wire_len(&self) -> usize {
        match self {
            Self::Ipv4(_) => 4,
            Self::Domain(name) => 1 + name.len(),
            Self::Ipv6(_) => 16,
        }
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Self::Ipv4(addr)
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Self {
        Self::Ipv6(addr)
    }
}

impl From<std::net::IpAddr> for Address {
    fn from(addr: std::net::IpAddr) -> Self {
        match addr {
            std::net::IpAddr::V4(v4) => Self::Ipv4(v4),
            std::net::IpAddr::V6(v6) => Self::Ipv6(v6),
        }
    }
}

impl From<DomainName> for Address {
    fn from(name: DomainName) -> Self {
        Self::Domain(name)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4(addr) => addr.fmt(f),
            Self::Domain(name) => name.fmt(f),
            Self::Ipv6(addr) => addr.fmt(f),
        }
    }
}
