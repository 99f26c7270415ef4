use std::net::IpAddr;

use ipnet::IpNet;

/// Address family of an IP table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    Ipv4,
    Ipv6,
}

impl AddressFamily {
    /// Label used in the `Type` output column
    pub fn as_str(self) -> &'static str {
        match self {
            AddressFamily::Ipv4 => "ipv4",
            AddressFamily::Ipv6 => "ipv6",
        }
    }
}

/// A normalized IP/CIDR table entry
#[derive(Debug, Clone)]
pub struct IpRecord {
    /// Parsed address; printed in library-canonical form, never verbatim
    pub address: IpAddr,
    /// Mask field as given in the input (prefix length or netmask literal)
    pub mask: String,
    /// Network built from (address, mask), host bits preserved
    pub network: IpNet,
    /// Flag tokens, input order preserved
    pub flags: Vec<String>,
}

impl IpRecord {
    pub fn family(&self) -> AddressFamily {
        match self.address {
            IpAddr::V4(_) => AddressFamily::Ipv4,
            IpAddr::V6(_) => AddressFamily::Ipv6,
        }
    }

    /// Lowercase hex of the address, zero-padded to the family width
    /// (8 digits for IPv4, 32 for IPv6), no `0x` prefix.
    pub fn address_hex(&self) -> String {
        match self.address {
            IpAddr::V4(v4) => format!("{:08x}", u32::from(v4)),
            IpAddr::V6(v6) => format!("{:032x}", u128::from(v6)),
        }
    }

    /// Lowercase hex of the netmask, same width convention as [`Self::address_hex`].
    pub fn mask_hex(&self) -> String {
        match self.network {
            IpNet::V4(net) => format!("{:08x}", u32::from(net.netmask())),
            IpNet::V6(net) => format!("{:032x}", u128::from(net.netmask())),
        }
    }
}

/// A normalized domain/SNI table entry
#[derive(Debug, Clone)]
pub struct DomainRecord {
    /// Domain or SNI match pattern
    pub pattern: String,
    /// Company name; `None` is written as the `NULL` sentinel
    pub company: Option<String>,
    /// Flag tokens, input order preserved
    pub flags: Vec<String>,
}

/// Join flag tokens for the `Flags` column. Flags are assumed not to
/// contain `;`, so no escaping is performed.
pub fn join_flags(flags: &[String]) -> String {
    flags.join(";")
}
