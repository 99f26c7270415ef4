use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use env_logger::Env;
use log::{error, info};

use sni2csv::{convert, ConvertError, CsvEmitter, Result, Stats};

/// Convert nDPI's SNI/IP content-match table into flat CSV lookup files
#[derive(Parser)]
#[command(name = "sni2csv", version, about)]
struct Cli {
    /// Path to the nDPI content-match source file (ndpi_content_match.c.inc)
    input: Option<PathBuf>,

    /// Output path for the IP/CIDR table
    #[arg(long, default_value = "sniIP.csv")]
    ip_out: PathBuf,

    /// Output path for the domain/SNI table
    #[arg(long, default_value = "sniTLS.csv")]
    domain_out: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // No input path is not an error: print usage and leave, like the
    // tool has always done.
    let Some(input) = cli.input else {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    };

    match run(&input, &cli.ip_out, &cli.domain_out) {
        Ok(stats) => {
            info!(
                "Wrote {} IP rows to {:?} and {} domain rows to {:?} ({} tuples skipped)",
                stats.ip_records, cli.ip_out, stats.domain_records, cli.domain_out, stats.skipped
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: &PathBuf, ip_out: &PathBuf, domain_out: &PathBuf) -> Result<Stats> {
    // The table is a few hundred KiB at most; read it whole.
    let text = fs::read_to_string(input).map_err(|e| ConvertError::ReadInput {
        path: input.clone(),
        source: e,
    })?;

    let mut emitter = CsvEmitter::from_paths(ip_out, domain_out)?;
    let stats = convert(&text, &mut emitter)?;
    emitter.flush()?;
    Ok(stats)
}
