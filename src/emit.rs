//! CSV output for the two record kinds.
//!
//! Each destination gets its header row at open time, so an input with
//! no matching tuples still produces a header-only file. Fields are
//! written unquoted; the table grammar guarantees they never contain a
//! raw comma outside the already-consumed quoted sections.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, Writer, WriterBuilder};
use serde::Serialize;

use crate::error::{ConvertError, Result};
use crate::types::{join_flags, DomainRecord, IpRecord};

pub const IP_HEADER: [&str; 6] = ["IP", "IPInHex", "Mask", "MaskInHex", "Type", "Flags"];
pub const DOMAIN_HEADER: [&str; 3] = ["Domain", "Company", "Flags"];

#[derive(Debug, Serialize)]
struct IpRow<'a> {
    #[serde(rename = "IP")]
    ip: String,
    #[serde(rename = "IPInHex")]
    ip_hex: String,
    #[serde(rename = "Mask")]
    mask: &'a str,
    #[serde(rename = "MaskInHex")]
    mask_hex: String,
    #[serde(rename = "Type")]
    family: &'static str,
    #[serde(rename = "Flags")]
    flags: String,
}

#[derive(Debug, Serialize)]
struct DomainRow<'a> {
    #[serde(rename = "Domain")]
    domain: &'a str,
    #[serde(rename = "Company")]
    company: &'a str,
    #[serde(rename = "Flags")]
    flags: String,
}

/// Paired CSV writers for the IP table and the domain table.
///
/// Opened once by the caller and flushed before drop; rows are only
/// ever appended.
pub struct CsvEmitter<W: Write> {
    ip: Writer<W>,
    domain: Writer<W>,
}

fn builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder.quote_style(QuoteStyle::Never);
    builder.has_headers(false);
    builder
}

impl CsvEmitter<File> {
    /// Open both output files and write their header rows.
    pub fn from_paths(ip_path: impl AsRef<Path>, domain_path: impl AsRef<Path>) -> Result<Self> {
        let ip = builder()
            .from_path(&ip_path)
            .map_err(|e| ConvertError::CreateOutput {
                path: ip_path.as_ref().to_path_buf(),
                source: e,
            })?;
        let domain = builder()
            .from_path(&domain_path)
            .map_err(|e| ConvertError::CreateOutput {
                path: domain_path.as_ref().to_path_buf(),
                source: e,
            })?;
        Self::with_writers(ip, domain)
    }
}

impl<W: Write> CsvEmitter<W> {
    /// Wrap arbitrary writers and write the header rows.
    pub fn from_writers(ip: W, domain: W) -> Result<Self> {
        Self::with_writers(builder().from_writer(ip), builder().from_writer(domain))
    }

    fn with_writers(ip: Writer<W>, domain: Writer<W>) -> Result<Self> {
        let mut emitter = Self { ip, domain };
        emitter.ip.write_record(IP_HEADER)?;
        emitter.domain.write_record(DOMAIN_HEADER)?;
        Ok(emitter)
    }

    /// Append one row to the IP table.
    pub fn emit_ip(&mut self, rec: &IpRecord) -> Result<()> {
        self.ip.serialize(IpRow {
            ip: rec.address.to_string(),
            ip_hex: rec.address_hex(),
            mask: &rec.mask,
            mask_hex: rec.mask_hex(),
            family: rec.family().as_str(),
            flags: join_flags(&rec.flags),
        })?;
        Ok(())
    }

    /// Append one row to the domain table.
    pub fn emit_domain(&mut self, rec: &DomainRecord) -> Result<()> {
        self.domain.serialize(DomainRow {
            domain: &rec.pattern,
            company: rec.company.as_deref().unwrap_or("NULL"),
            flags: join_flags(&rec.flags),
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.ip.flush()?;
        self.domain.flush()?;
        Ok(())
    }

    /// Unwrap the underlying writers, flushing first.
    pub fn into_writers(self) -> Result<(W, W)> {
        let ip = self
            .ip
            .into_inner()
            .map_err(|e| ConvertError::Io(e.into_error()))?;
        let domain = self
            .domain
            .into_inner()
            .map_err(|e| ConvertError::Io(e.into_error()))?;
        Ok((ip, domain))
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use ipnet::{IpNet, Ipv4Net};

    use super::*;

    fn output(emitter: CsvEmitter<Vec<u8>>) -> (String, String) {
        let (ip, domain) = emitter.into_writers().unwrap();
        (String::from_utf8(ip).unwrap(), String::from_utf8(domain).unwrap())
    }

    #[test]
    fn test_headers_written_at_open() {
        let emitter = CsvEmitter::from_writers(Vec::new(), Vec::new()).unwrap();
        let (ip, domain) = output(emitter);
        assert_eq!(ip, "IP,IPInHex,Mask,MaskInHex,Type,Flags\n");
        assert_eq!(domain, "Domain,Company,Flags\n");
    }

    #[test]
    fn test_ip_row_format() {
        let mut emitter = CsvEmitter::from_writers(Vec::new(), Vec::new()).unwrap();
        let addr = Ipv4Addr::new(157, 240, 0, 0);
        emitter
            .emit_ip(&IpRecord {
                address: IpAddr::V4(addr),
                mask: "17".to_string(),
                network: IpNet::V4(Ipv4Net::new(addr, 17).unwrap()),
                flags: vec![
                    "NDPI_PROTOCOL_FACEBOOK".to_string(),
                    "NDPI_PROTOCOL_CATEGORY_SOCIAL_NETWORK".to_string(),
                ],
            })
            .unwrap();
        let (ip, _) = output(emitter);
        assert_eq!(
            ip,
            "IP,IPInHex,Mask,MaskInHex,Type,Flags\n\
             157.240.0.0,9df00000,17,ffff8000,ipv4,NDPI_PROTOCOL_FACEBOOK;NDPI_PROTOCOL_CATEGORY_SOCIAL_NETWORK\n"
        );
    }

    #[test]
    fn test_domain_row_with_null_company() {
        let mut emitter = CsvEmitter::from_writers(Vec::new(), Vec::new()).unwrap();
        emitter
            .emit_domain(&DomainRecord {
                pattern: "internal.test".to_string(),
                company: None,
                flags: vec!["NDPI_PROTOCOL_TLS".to_string()],
            })
            .unwrap();
        emitter
            .emit_domain(&DomainRecord {
                pattern: "www.example.com".to_string(),
                company: Some("Example Inc".to_string()),
                flags: vec!["NDPI_PROTOCOL_TLS".to_string()],
            })
            .unwrap();
        let (_, domain) = output(emitter);
        assert_eq!(
            domain,
            "Domain,Company,Flags\n\
             internal.test,NULL,NDPI_PROTOCOL_TLS\n\
             www.example.com,Example Inc,NDPI_PROTOCOL_TLS\n"
        );
    }
}
