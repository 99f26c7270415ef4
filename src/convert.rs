//! Single-pass driver: raw table text in, CSV rows out.

use std::io::Write;

use log::debug;

use crate::classify::{classify_line, Classified};
use crate::emit::CsvEmitter;
use crate::error::Result;

/// Counters for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Rows appended to the IP table
    pub ip_records: usize,
    /// Rows appended to the domain table
    pub domain_records: usize,
    /// Tuple lines that produced no record
    pub skipped: usize,
}

/// Convert the whole table text, appending rows to `emitter`.
///
/// Lines are independent: a tuple that produces no record is counted
/// and logged, and processing continues to end of input. Only IO/CSV
/// failures abort the run.
pub fn convert<W: Write>(input: &str, emitter: &mut CsvEmitter<W>) -> Result<Stats> {
    let mut stats = Stats::default();

    for (line_num, line) in input.lines().enumerate() {
        let line_num = line_num + 1; // 1-based line numbers
        match classify_line(line) {
            None => {}
            Some(Classified::Ip(rec)) => {
                emitter.emit_ip(&rec)?;
                stats.ip_records += 1;
            }
            Some(Classified::Domain(rec)) => {
                emitter.emit_domain(&rec)?;
                stats.domain_records += 1;
            }
            Some(Classified::Skipped(reason)) => {
                debug!("line {line_num}: skipped tuple ({reason})");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (Stats, String, String) {
        let mut emitter = CsvEmitter::from_writers(Vec::new(), Vec::new()).unwrap();
        let stats = convert(input, &mut emitter).unwrap();
        let (ip, domain) = emitter.into_writers().unwrap();
        (
            stats,
            String::from_utf8(ip).unwrap(),
            String::from_utf8(domain).unwrap(),
        )
    }

    #[test]
    fn test_mixed_input() {
        let input = r#"
static ndpi_network host_protocol_list[] = {
 { 0x9DF00000 /* 157.240.0.0/17 */, 17, NDPI_PROTOCOL_FACEBOOK },
 { "www.example.com", "Example Inc", NDPI_PROTOCOL_TLS },
 { "internal.test", NDPI_PROTOCOL_TLS },
 { 0x0, NULL, NDPI_PROTOCOL_UNKNOWN },
};
"#;
        let (stats, ip, domain) = run(input);
        assert_eq!(stats.ip_records, 1);
        assert_eq!(stats.domain_records, 2);
        assert_eq!(stats.skipped, 1); // the 0x0 sentinel row
        assert!(ip.contains("157.240.0.0,9df00000,17,ffff8000,ipv4,NDPI_PROTOCOL_FACEBOOK"));
        assert!(domain.contains("www.example.com,Example Inc,NDPI_PROTOCOL_TLS"));
        assert!(domain.contains("internal.test,NULL,NDPI_PROTOCOL_TLS"));
    }

    #[test]
    fn test_non_tuple_lines_do_not_count_as_skips() {
        let input = "#include \"ndpi_api.h\"\nstatic ndpi_network list[] = {\n};\n";
        let (stats, ip, domain) = run(input);
        assert_eq!(stats, Stats::default());
        assert_eq!(ip, "IP,IPInHex,Mask,MaskInHex,Type,Flags\n");
        assert_eq!(domain, "Domain,Company,Flags\n");
    }

    #[test]
    fn test_malformed_tuple_does_not_abort() {
        let input = "\
{ 0x0A000000, bogus-mask, NDPI_PROTOCOL_VPN },
{ 0x0A000000, 8, NDPI_PROTOCOL_VPN },
";
        let (stats, ip, _) = run(input);
        assert_eq!(stats.ip_records, 1);
        assert_eq!(stats.skipped, 1);
        assert!(ip.contains("10.0.0.0,0a000000,8,ff000000,ipv4,NDPI_PROTOCOL_VPN"));
    }

    #[test]
    fn test_empty_input_produces_headers_only() {
        let (stats, ip, domain) = run("");
        assert_eq!(stats, Stats::default());
        assert_eq!(ip.lines().count(), 1);
        assert_eq!(domain.lines().count(), 1);
    }
}
