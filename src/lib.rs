//! sni2csv - convert nDPI's SNI/IP content-match table into CSV lookup files
//!
//! nDPI ships its hostname/IP classification data as C initializer-list
//! literals (`ndpi_content_match.c.inc`). This crate reads that file
//! line by line, classifies each tuple as an IP/CIDR range or a
//! domain/SNI pattern, normalizes the fields, and appends CSV rows to
//! two output tables.
//!
//! # Example
//!
//! ```rust
//! use sni2csv::{convert, CsvEmitter};
//!
//! let table = r#"
//! static ndpi_network host_protocol_list[] = {
//!  { 0x9DF00000 /* 157.240.0.0/17 */, 17, NDPI_PROTOCOL_FACEBOOK },
//!  { "www.netflix.com", "Netflix", NDPI_PROTOCOL_NETFLIX },
//! };
//! "#;
//!
//! let mut emitter = CsvEmitter::from_writers(Vec::new(), Vec::new()).unwrap();
//! let stats = convert(table, &mut emitter).unwrap();
//! assert_eq!(stats.ip_records, 1);
//! assert_eq!(stats.domain_records, 1);
//! ```
//!
//! # Input format
//!
//! One tuple per line; anything not starting with `{` is C scaffolding
//! and is ignored:
//!
//! ```text
//! { first, second, flag, flag, ... },
//! ```
//!
//! | First field | Classified as | Second field |
//! |-------------|---------------|--------------|
//! | hex literal (`0x9DF00000`) | IPv4 range | mask (prefix length or netmask) |
//! | address literal (`2620:10d:c090::`) | IP range, family per syntax | mask |
//! | anything else (`".netflix.com"`) | domain/SNI pattern | company name, unless it is an `NDPI_*` token |
//! | empty, `0x0`, `NULL` | sentinel, dropped | - |
//!
//! `/* ... */` spans inside the fixed fields are stripped; remaining
//! fields are carried verbatim as flags.
//!
//! # Output format
//!
//! | Table | Columns |
//! |-------|---------|
//! | IP | `IP,IPInHex,Mask,MaskInHex,Type,Flags` (`Type` is `ipv4` or `ipv6`) |
//! | Domain | `Domain,Company,Flags` (`Company` is `NULL` when absent) |
//!
//! Hex columns are lowercase without `0x`, zero-padded to the family
//! width. Flags are joined with `;`.

pub mod classify;
pub mod convert;
pub mod emit;
pub mod error;
pub mod tokenizer;
pub mod types;

pub use classify::{classify_line, classify_tuple, Classified, SkipReason};
pub use convert::{convert, Stats};
pub use emit::CsvEmitter;
pub use error::{ConvertError, Result};
pub use types::{AddressFamily, DomainRecord, IpRecord};
