use crate::cli::Cli;
use crate::config::PartialAssessConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use chrono::Local;
use isecc::{
    core::io::{
        header::{self, RunInfo},
        star::{StarFile, StarMetadata, StarTable},
        traits::MetadataFile,
    },
    engine::{config::AssessConfig, progress::ProgressReporter},
    workflows::assess::{self, AssessmentResult},
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

pub fn run(args: &Cli) -> Result<()> {
    ensure_star_file(&args.pentavalent)?;
    ensure_star_file(&args.hexavalent)?;

    let config = PartialAssessConfig::load(args.config.as_deref())?.merge_with_cli(args)?;
    let run_info = current_run_info();

    let (pentavalent, pent_meta) = read_table(&args.pentavalent)?;
    let pent_header = header::derive_header(&pentavalent, &pent_meta, &run_info);
    debug!(
        "Pentavalent header carries {} field(s).",
        pent_header.fields.len()
    );

    let (hexavalent, hex_meta) = read_table(&args.hexavalent)?;
    let hex_header = header::derive_header(&hexavalent, &hex_meta, &run_info);
    if let Some(path) = &args.header_out {
        info!("Writing regenerated subparticle header to {:?}", path);
        let mut writer = BufWriter::new(File::create(path)?);
        hex_header.write_to(&mut writer)?;
        writer.flush()?;
    }

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let result = assess::run(&pentavalent, &hexavalent, &config, &reporter)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &config, &result)?;
    out.flush()?;
    Ok(())
}

fn ensure_star_file(path: &Path) -> Result<()> {
    if !StarFile::has_extension(path) {
        return Err(CliError::Argument(format!(
            "Please provide a valid star file: {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(CliError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Input file does not exist: {}", path.display()),
        )));
    }
    Ok(())
}

fn read_table(path: &Path) -> Result<(StarTable, StarMetadata)> {
    info!("Reading locally refined coordinates from {:?}", path);
    let (table, metadata) = StarFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    info!("Read {} record(s) from {:?}", table.len(), path);
    Ok((table, metadata))
}

fn current_run_info() -> RunInfo {
    let now = Local::now();
    let mut argv = std::env::args();
    let program = argv.next().unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    RunInfo {
        date: now.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
        program,
        arguments: argv.collect::<Vec<_>>().join(" "),
        timestamp: now.format("%Y%m%d_%H%M").to_string(),
    }
}

fn write_report(
    out: &mut impl Write,
    config: &AssessConfig,
    result: &AssessmentResult,
) -> io::Result<()> {
    let thresholds = &result.report.thresholds;

    writeln!(
        out,
        "Relative z range is from {} to {}",
        result.z_range.min, result.z_range.max
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Current threshold is {} of particle radius. Will only consider vertices where:",
        config.correlation.inclusion_threshold
    )?;
    writeln!(out, "   pentavalent relative Z > {}", thresholds.z_threshold)?;
    writeln!(out, "   pentavalent relative Z < {}", -thresholds.z_threshold)?;
    writeln!(out)?;
    writeln!(
        out,
        "Reporting ideal 3-D, ideal flattened and refined flattened distances between the"
    )?;
    writeln!(
        out,
        "   widest pair of capsomers per particle. Values in Angstroms."
    )?;
    writeln!(out)?;
    writeln!(out, "For central plane, will consider capsomers in z-range of:")?;
    writeln!(
        out,
        "   {} < relative Z < {}",
        -thresholds.central_slice_threshold, thresholds.central_slice_threshold
    )?;
    writeln!(
        out,
        "   This represents a threshold of: {}",
        thresholds.central_slice_limit
    )?;
    writeln!(out, "   Note: Z-dimension is flattened for this analysis.")?;
    writeln!(out)?;

    for line in &result.report.lines {
        debug!("Particle {} ('{}')", line.label(), line.particle_specifier);
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
