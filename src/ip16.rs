//! The uniform 16-byte IP address representation every mode encrypts.
//!
//! IPv4 addresses are canonicalized into the IPv4-mapped IPv6 range
//! (`::ffff:a.b.c.d`) so that every address, regardless of family, is a
//! plain 16-byte block with no length discriminant carried alongside it.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

use crate::error::IpCryptError;

const IPV4_MAPPED_PREFIX: [u8; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff];

/// A 16-byte IP address, with IPv4 addresses canonicalized to their
/// IPv4-mapped IPv6 form.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Ip16(pub [u8; 16]);

impl Ip16 {
    /// True if this address is an IPv4-mapped IPv6 address
    /// (`::ffff:a.b.c.d`).
    pub fn is_ipv4_mapped(&self) -> bool {
        self.0[..12] == IPV4_MAPPED_PREFIX
    }

    pub fn to_ip_addr(self) -> IpAddr {
        if self.is_ipv4_mapped() {
            IpAddr::V4(Ipv4Addr::new(self.0[12], self.0[13], self.0[14], self.0[15]))
        } else {
            IpAddr::V6(Ipv6Addr::from(self.0))
        }
    }

    pub fn from_socket_addr(addr: SocketAddr) -> Self {
        Ip16::from(addr.ip())
    }

    pub fn to_socket_addr(self, port: u16) -> SocketAddr {
        SocketAddr::new(self.to_ip_addr(), port)
    }
}

impl From<IpAddr> for Ip16 {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => {
                let mut bytes = [0u8; 16];
                bytes[..12].copy_from_slice(&IPV4_MAPPED_PREFIX);
                bytes[12..].copy_from_slice(&v4.octets());
                Ip16(bytes)
            }
            IpAddr::V6(v6) => Ip16(v6.octets()),
        }
    }
}

impl FromStr for Ip16 {
    type Err = IpCryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<IpAddr>()
            .map(Ip16::from)
            .map_err(|_| IpCryptError::InvalidIpString { input: s.to_string() })
    }
}

impl fmt::Display for Ip16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ip_addr())
    }
}
