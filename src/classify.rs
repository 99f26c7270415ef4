//! Classifies a raw tuple as an IP/CIDR entry or a domain/SNI entry and
//! normalizes its fields.
//!
//! Decision order follows the upstream table convention: the first field
//! is checked as a hexadecimal literal before it is checked as an
//! address literal, and anything that is neither is a domain pattern.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::tokenizer::{strip_comment, tuple_fields};
use crate::types::{DomainRecord, IpRecord};

/// Hexadecimal literal: optional 0x prefix, hex digits only.
static HEX_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:0[xX])?[0-9A-Fa-f]+$").expect("HEX_LITERAL: hardcoded regex is invalid")
});

/// Outcome of classifying one tuple.
#[derive(Debug, Clone)]
pub enum Classified {
    Ip(IpRecord),
    Domain(DomainRecord),
    /// The tuple produced no record; the reason says why.
    Skipped(SkipReason),
}

/// Why a tuple line produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Tuple body had no fields at all
    EmptyTuple,
    /// First field was empty, `0x0`, or `NULL`
    Sentinel,
    /// IP entry without a mask field
    MissingMask,
    /// Mask field did not combine with the address into a network
    InvalidNetwork,
    /// No flag tokens left after the fixed fields
    NoFlags,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SkipReason::EmptyTuple => "empty tuple",
            SkipReason::Sentinel => "sentinel or empty first field",
            SkipReason::MissingMask => "IP entry without mask",
            SkipReason::InvalidNetwork => "invalid address/mask combination",
            SkipReason::NoFlags => "no flag tokens",
        };
        f.write_str(msg)
    }
}

/// Tokenize and classify one raw input line.
///
/// Returns `None` for lines that are not tuples at all; those are
/// ignored without counting as skips.
pub fn classify_line(line: &str) -> Option<Classified> {
    let fields = tuple_fields(line)?;
    Some(classify_tuple(&fields))
}

/// Classify a tokenized tuple.
pub fn classify_tuple(fields: &[String]) -> Classified {
    let Some(first_raw) = fields.first() else {
        return Classified::Skipped(SkipReason::EmptyTuple);
    };
    let first = strip_comment(first_raw);
    let first = first.trim();

    if first.is_empty() || first == "0x0" || first == "NULL" {
        return Classified::Skipped(SkipReason::Sentinel);
    }

    let rest = &fields[1..];
    match parse_address(first) {
        Some(address) => classify_ip(address, rest),
        None => classify_domain(first, rest),
    }
}

/// Interpret the first field as an address, if it is one.
///
/// A hexadecimal literal is a 32-bit big-endian integer and always maps
/// to IPv4; the hex check takes precedence over the address-syntax
/// check. A literal wider than 32 bits is not treated as hex and falls
/// through. Literal address strings keep the family of their syntax.
fn parse_address(field: &str) -> Option<IpAddr> {
    if HEX_LITERAL.is_match(field) {
        let digits = field
            .strip_prefix("0x")
            .or_else(|| field.strip_prefix("0X"))
            .unwrap_or(field);
        if let Ok(value) = u32::from_str_radix(digits, 16) {
            return Some(IpAddr::V4(Ipv4Addr::from(value)));
        }
    }
    field.parse::<IpAddr>().ok()
}

fn classify_ip(address: IpAddr, rest: &[String]) -> Classified {
    let Some(mask_raw) = rest.first() else {
        return Classified::Skipped(SkipReason::MissingMask);
    };
    let mask = strip_comment(mask_raw);
    let mask = mask.trim().to_string();

    let Some(network) = build_network(address, &mask) else {
        return Classified::Skipped(SkipReason::InvalidNetwork);
    };

    let flags = rest[1..].to_vec();
    if flags.is_empty() {
        return Classified::Skipped(SkipReason::NoFlags);
    }

    Classified::Ip(IpRecord {
        address,
        mask,
        network,
        flags,
    })
}

/// Build the network non-strictly: the address keeps its host bits, the
/// mask only determines the netmask. The mask field may be a prefix
/// length or a netmask literal of the matching family.
fn build_network(address: IpAddr, mask: &str) -> Option<IpNet> {
    match address {
        IpAddr::V4(v4) => {
            if let Ok(prefix) = mask.parse::<u8>() {
                return Ipv4Net::new(v4, prefix).ok().map(IpNet::V4);
            }
            let netmask = mask.parse::<Ipv4Addr>().ok()?;
            Ipv4Net::with_netmask(v4, netmask).ok().map(IpNet::V4)
        }
        IpAddr::V6(v6) => {
            if let Ok(prefix) = mask.parse::<u8>() {
                return Ipv6Net::new(v6, prefix).ok().map(IpNet::V6);
            }
            let netmask = mask.parse::<Ipv6Addr>().ok()?;
            Ipv6Net::with_netmask(v6, netmask).ok().map(IpNet::V6)
        }
    }
}

fn classify_domain(pattern: &str, rest: &[String]) -> Classified {
    // A second field that carries an NDPI_* token is a flag, not a
    // company name; leave it in place for flag collection.
    let (company, flags) = match rest.first() {
        Some(field) if !field.contains("NDPI") => {
            let company = strip_comment(field);
            let company = company.trim();
            let company = (!company.is_empty()).then(|| company.to_string());
            (company, &rest[1..])
        }
        _ => (None, rest),
    };

    if flags.is_empty() {
        return Classified::Skipped(SkipReason::NoFlags);
    }

    Classified::Domain(DomainRecord {
        pattern: pattern.to_string(),
        company,
        flags: flags.to_vec(),
    })
}
