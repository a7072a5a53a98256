use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Daniel Goetschius",
    version,
    about = "Assess local motions of capsomers: compares locally refined pentavalent and hexavalent capsomer positions against their icosahedral priors.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    // --- Core Arguments ---
    /// Locally refined pentavalent capsomers (.star).
    #[arg(long, required = true, value_name = "PATH")]
    pub pentavalent: PathBuf,

    /// Locally refined hexavalent capsomers (.star).
    #[arg(long, required = true, value_name = "PATH")]
    pub hexavalent: PathBuf,

    /// Threshold for inclusion, as a fraction of the particle radius [default: 0.9].
    #[arg(long, value_name = "FLOAT")]
    pub threshold: Option<f64>,

    // --- Analysis Overrides ---
    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the regenerated subparticle header of the hexavalent table to this file.
    #[arg(long, value_name = "PATH")]
    pub header_out: Option<PathBuf>,

    // --- Logging ---
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output; errors are still printed on exit
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_required_paths_and_optional_threshold() {
        let cli = Cli::try_parse_from([
            "isecc-local-motions",
            "--pentavalent",
            "pent.star",
            "--hexavalent",
            "hex.star",
            "--threshold",
            "0.75",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.pentavalent, PathBuf::from("pent.star"));
        assert_eq!(cli.hexavalent, PathBuf::from("hex.star"));
        assert_eq!(cli.threshold, Some(0.75));
        assert_eq!(cli.verbose, 2);
        assert!(cli.config.is_none());
    }

    #[test]
    fn missing_hexavalent_path_is_rejected() {
        let result = Cli::try_parse_from(["isecc-local-motions", "--pentavalent", "pent.star"]);
        assert!(result.is_err());
    }
}
